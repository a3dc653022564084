//! Command-line behaviour of the demo, driven through its parser.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow, ensure};
use argfold::{BufferedReporter, Channel, NoTerminate};
use hello_world::cli::{Commands, HelloWorldCli, RECIPIENT_VAR, parser};
use rstest::rstest;
use test_helpers::env;

fn parse(args: &[&str]) -> (Option<HelloWorldCli>, Arc<BufferedReporter>) {
    let reporter = Arc::new(BufferedReporter::new());
    let parsed = parser()
        .with_reporter(reporter.clone())
        .with_terminator(Arc::new(NoTerminate))
        .parse(args.iter().copied(), HelloWorldCli::default());
    (parsed, reporter)
}

#[test]
fn recipient_falls_back_to_environment() -> Result<()> {
    let _guard = env::set_var(RECIPIENT_VAR, "Grace");
    let (parsed, _) = parse(&["-s", "Hi,there"]);
    let cli = parsed.ok_or_else(|| anyhow!("parse failed"))?;
    ensure!(cli.recipient == "Grace", "recipient {}", cli.recipient);
    ensure!(cli.salutations == ["Hi", "there"], "salutations {:?}", cli.salutations);
    Ok(())
}

#[test]
fn take_leave_collects_its_options() -> Result<()> {
    let (parsed, _) = parse(&["take-leave", "-w", "--remind-in", "15m", "-r", "Ada"]);
    let cli = parsed.ok_or_else(|| anyhow!("parse failed"))?;
    let Some(Commands::TakeLeave(leave)) = cli.command else {
        return Err(anyhow!("expected take-leave, got {:?}", cli.command));
    };
    ensure!(cli.recipient == "Ada", "recipient {}", cli.recipient);
    ensure!(leave.wave, "wave should be set");
    ensure!(
        leave.remind_in == Some(Duration::from_secs(900)),
        "remind_in {:?}",
        leave.remind_in
    );
    Ok(())
}

#[rstest]
#[case(&["-eq"], "Error: cannot combine --is-excited with --is-quiet")]
#[case(&["greet", "--parting", "bye"], "Error: Unknown option --parting")]
#[case(
    &["take-leave", "--remind-in", "0s"],
    "Error: reminder delay must be greater than zero"
)]
fn invalid_command_lines_are_reported(#[case] args: &[&str], #[case] expected: &str) -> Result<()> {
    let (parsed, reporter) = parse(args);
    ensure!(parsed.is_none(), "parse should fail");
    let errors = reporter.channel(Channel::Err);
    ensure!(
        errors.first().map(String::as_str) == Some(expected),
        "unexpected diagnostics {errors:?}"
    );
    ensure!(
        errors.last().map(String::as_str) == Some("Try --help for more information."),
        "unexpected diagnostics {errors:?}"
    );
    Ok(())
}

#[test]
fn version_prints_header() -> Result<()> {
    let (_, reporter) = parse(&["--version"]);
    let out = reporter.channel(Channel::Out);
    let first = out.first().ok_or_else(|| anyhow!("nothing displayed"))?;
    ensure!(
        first.starts_with(concat!("hello-world ", env!("CARGO_PKG_VERSION"))),
        "unexpected header {first}"
    );
    Ok(())
}
