//! Help and version options displaying text and asking to terminate.

use anyhow::{Result, ensure};
use argfold::{Channel, ExitState, OptionParser};

mod common;

fn parser() -> OptionParser<u8> {
    let mut parser = OptionParser::new("tool");
    parser.head(["tool", "3.1.4"]);
    parser.head(["Folds arguments."]);
    parser.help("help").abbr("h");
    parser.version("version").abbr("V");
    parser.opt::<u8>("level").action(|level, _| level);
    parser
}

#[test]
fn help_displays_usage_and_terminates() -> Result<()> {
    let (wired, sinks) = common::harness(parser());
    let usage = wired.usage();
    let result = wired.parse(["-h"], 0);
    ensure!(result == Some(0), "parse continues after a returning terminator");
    ensure!(
        sinks.reporter.channel(Channel::Out) == [usage],
        "usage goes to the output channel"
    );
    ensure!(
        sinks.terminator.requests() == [ExitState::Success],
        "requests {:?}",
        sinks.terminator.requests()
    );
    Ok(())
}

#[test]
fn version_displays_header_lines() -> Result<()> {
    let (wired, sinks) = common::harness(parser());
    let level = wired.parse(["--version", "--level", "2"], 0);
    ensure!(level == Some(2), "parse continues after --version: {level:?}");
    ensure!(
        sinks.reporter.channel(Channel::Out) == ["tool 3.1.4\nFolds arguments."],
        "out {:?}",
        sinks.reporter.channel(Channel::Out)
    );
    ensure!(
        sinks.terminator.requests() == [ExitState::Success],
        "requests {:?}",
        sinks.terminator.requests()
    );
    Ok(())
}

#[test]
fn errors_point_at_the_help_option() -> Result<()> {
    let (wired, sinks) = common::harness(parser());
    ensure!(wired.parse(["--level", "300"], 0).is_none(), "level overflows u8");
    let err = sinks.reporter.channel(Channel::Err);
    ensure!(
        err.last().map(String::as_str) == Some("Try --help for more information."),
        "err {err:?}"
    );
    ensure!(
        sinks.terminator.requests().is_empty(),
        "failures never terminate"
    );
    Ok(())
}
