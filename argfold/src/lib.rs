//! Declarative command-line parsing that folds tokens into a typed
//! configuration.
//!
//! Callers describe a program's surface on an [`OptionParser`]: options,
//! positional arguments, nested commands, notes and whole-configuration
//! checks. A parse walks the tokens once, decoding each value with the
//! [`Decoder`] resolved when its definition was built, and folds it into the
//! configuration through the definition's action. Every diagnostic of the
//! parse is collected; none stops it early.
//!
//! ```
//! use argfold::OptionParser;
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     jobs: usize,
//!     target: String,
//! }
//!
//! let mut parser = OptionParser::<Config>::new("build");
//! parser
//!     .opt::<usize>("jobs")
//!     .abbr("j")
//!     .action(|jobs, c| Config { jobs, ..c });
//! parser
//!     .arg::<String>("target")
//!     .action(|target, c| Config { target, ..c });
//!
//! let config = parser.try_parse(["-j=4", "release"], Config::default())?;
//! assert_eq!((config.jobs, config.target.as_str()), (4, "release"));
//! # Ok::<(), argfold::ParseErrors>(())
//! ```

mod builder;
mod decode;
mod definition;
mod error;
mod parser;
mod registry;
mod report;
mod settings;
mod usage;
mod validate;

pub use bigdecimal::BigDecimal;
pub use builder::DefBuilder;
pub use decode::{Arity, Decode, Decoder};
pub use definition::{DefId, DefKind, Definition};
pub use error::{DecodeError, ParseError, ParseErrors};
pub use num_bigint::BigInt;
pub use parser::OptionParser;
pub use report::{
    BufferedReporter, Channel, ExitProcess, ExitState, NoTerminate, Reporter, Terminator,
    TracingReporter,
};
pub use settings::{ParserSettings, UsageLayout, UsageOnError};
pub use validate::{Validator, validate_value};
