//! Hello World demo entry point: parse the command line, build the plan,
//! print the message.

use std::sync::Arc;

use argfold::{ExitProcess, ExitState, Terminator};

use hello_world::cli::{Commands, GreetCommand, HelloWorldCli, parser};
use hello_world::console::ConsoleReporter;
use hello_world::error::HelloWorldError;
use hello_world::message::{build_plan, build_take_leave_plan, print_plan, print_take_leave};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let parser = parser().with_reporter(Arc::new(ConsoleReporter));
    let Some(config) = parser.parse(std::env::args().skip(1), HelloWorldCli::default()) else {
        ExitProcess.terminate(ExitState::Failure);
        return Ok(());
    };
    run(&config).map_err(color_eyre::eyre::Report::from)
}

fn run(config: &HelloWorldCli) -> Result<(), HelloWorldError> {
    match &config.command {
        Some(Commands::TakeLeave(command)) => {
            print_take_leave(&build_take_leave_plan(config, command)?)?;
        }
        Some(Commands::Greet(command)) => print_plan(&build_plan(config, command)?)?,
        None => print_plan(&build_plan(config, &GreetCommand::default())?)?,
    }
    Ok(())
}
