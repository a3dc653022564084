//! Command scoping: children, sibling exclusion and nested usage text.

use anyhow::{Result, ensure};
use argfold::OptionParser;
use rstest::{fixture, rstest};
use test_helpers::text::dedent;

#[derive(Debug, Default, PartialEq)]
struct Cli {
    verbose: bool,
    command: Vec<&'static str>,
    force: bool,
    paths: Vec<String>,
    remote: Option<String>,
}

#[fixture]
fn vcs() -> OptionParser<Cli> {
    let mut parser = OptionParser::new("vcs");
    parser.head(["vcs", "1.2.0"]);
    parser
        .opt::<()>("verbose")
        .abbr("v")
        .text("print more")
        .action(|(), c| Cli { verbose: true, ..c });
    parser.help("help").abbr("h");
    parser
        .cmd("add")
        .text("stage files")
        .action(|(), mut c| {
            c.command.push("add");
            c
        })
        .with_children(|p| {
            [
                p.opt::<()>("force")
                    .abbr("f")
                    .text("add ignored files")
                    .action(|(), c| Cli { force: true, ..c })
                    .id(),
                p.arg::<String>("path")
                    .unbounded()
                    .text("files to stage")
                    .action(|path, mut c| {
                        c.paths.push(path);
                        c
                    })
                    .id(),
            ]
        });
    parser
        .cmd("remote")
        .text("manage remotes")
        .action(|(), mut c| {
            c.command.push("remote");
            c
        })
        .with_children(|p| {
            [p.cmd("show")
                .text("show one remote")
                .action(|(), mut c| {
                    c.command.push("show");
                    c
                })
                .with_children(|q| {
                    [q.arg::<String>("name")
                        .text("remote to show")
                        .action(|name, c| Cli {
                            remote: Some(name),
                            ..c
                        })
                        .id()]
                })
                .id()]
        });
    parser
}

#[rstest]
fn command_children_bind_after_selection(vcs: OptionParser<Cli>) -> Result<()> {
    let cli = vcs.try_parse(["add", "-f", "a.txt", "b.txt"], Cli::default())?;
    ensure!(
        cli == Cli {
            command: vec!["add"],
            force: true,
            paths: vec!["a.txt".into(), "b.txt".into()],
            ..Cli::default()
        },
        "unexpected {cli:?}"
    );
    Ok(())
}

#[rstest]
fn nested_commands_resolve_in_turn(vcs: OptionParser<Cli>) -> Result<()> {
    let cli = vcs.try_parse(["remote", "show", "origin"], Cli::default())?;
    ensure!(cli.command == ["remote", "show"], "commands {:?}", cli.command);
    ensure!(cli.remote.as_deref() == Some("origin"), "remote {:?}", cli.remote);
    Ok(())
}

#[rstest]
#[case(&["remote", "add"], "Unknown argument 'add'")]
#[case(&["remote", "origin"], "Unknown argument 'origin'")]
#[case(&["-v", "add", "x"], "Unknown argument 'add'")]
#[case(&["--force", "add", "x"], "Unknown option --force")]
#[case(&["add"], "Missing argument path")]
fn out_of_scope_tokens_are_rejected(
    vcs: OptionParser<Cli>,
    #[case] args: &[&str],
    #[case] expected: &str,
) -> Result<()> {
    let errors = vcs
        .try_parse(args.iter().copied(), Cli::default())
        .err()
        .map(|errors| errors.messages())
        .unwrap_or_default();
    ensure!(
        errors.first().map(String::as_str) == Some(expected),
        "expected {expected:?}, got {errors:?}"
    );
    Ok(())
}

#[rstest]
fn usage_lists_children_under_their_command(vcs: OptionParser<Cli>) -> Result<()> {
    let expected = dedent(
        "
        vcs 1.2.0
        Usage: vcs [add|remote] [options] <args>...

          -v, --verbose  print more
          -h, --help     prints this usage text
        Command: add [options] path
        stage files
          -f, --force    add ignored files
          path           files to stage
        Command: remote [show] <args>...
        manage remotes
        Command: remote show name
        show one remote
          name           remote to show
        ",
    );
    let usage = vcs.usage();
    ensure!(usage == expected, "usage was:\n{usage}");
    Ok(())
}
