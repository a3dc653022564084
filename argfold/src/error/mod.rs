//! Error types produced while decoding values and parsing argument lists.

mod aggregate;
mod types;

pub use aggregate::ParseErrors;
pub use types::{DecodeError, ParseError};

#[cfg(test)]
mod tests;
