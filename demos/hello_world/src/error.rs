//! Error types for the `hello_world` demo.
//!
//! Parse diagnostics are reported by `argfold` itself; what remains here are
//! the checks the demo performs on the resolved configuration.

use thiserror::Error;

/// Errors raised by the hello world demo.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// The resolved configuration is unusable.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Writing the greeting failed.
    #[error("failed to write the greeting: {0}")]
    Output(#[from] std::io::Error),
}

/// Validation issues detected on the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A provided salutation collapsed to nothing after trimming.
    #[error("salutations must contain visible characters (index {0})")]
    BlankSalutation(usize),
    /// Mutually exclusive delivery modes were enabled simultaneously.
    #[error("cannot combine --is-excited with --is-quiet")]
    ConflictingDeliveryModes,
    /// Farewell phrase collapsed to nothing after trimming.
    #[error("farewell messages must contain visible characters")]
    BlankFarewell,
}
