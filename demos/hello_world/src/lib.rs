//! Library facade for the `hello_world` demo so tests can reuse the command
//! line definition and the greeting planner.

pub mod cli;
pub mod console;
pub mod error;
pub mod message;
