//! Primary error enums for decoding and parsing.

use thiserror::Error;

/// Failure raised by a [`crate::Decoder`] when a token cannot be converted.
///
/// Decode failures describe what was expected and why the text was rejected.
/// They never carry a token position; the parser attaches the offending
/// definition and raw text when it wraps them into [`ParseError::Decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expected}: {detail}")]
pub struct DecodeError {
    expected: String,
    detail: String,
}

impl DecodeError {
    /// Creates a decode failure for a value of the `expected` shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use argfold::DecodeError;
    /// let err = DecodeError::new("an integer", "invalid digit found in string");
    /// assert_eq!(err.expected(), "an integer");
    /// ```
    #[must_use]
    pub fn new(expected: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            detail: detail.into(),
        }
    }

    /// Human description of the value shape the decoder expected.
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Why the text was rejected.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// A single diagnostic produced by one parse.
///
/// `subject` fields hold the short description of the definition involved,
/// for example `option --foo`, `argument name` or `command update`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The decoder rejected the raw text supplied for a definition.
    #[error("{} could not decode {} for: {raw} ({})", capitalize(.subject), .source.expected(), .source.detail())]
    Decode {
        /// Definition that received the text.
        subject: String,
        /// Raw text handed to the decoder.
        raw: String,
        /// Failure reported by the decoder.
        #[source]
        source: DecodeError,
    },

    /// A value-taking option was the last token of the input.
    #[error("Missing value after {flag}")]
    MissingValue {
        /// The option token as written by the user.
        flag: String,
    },

    /// A value validator rejected a decoded value.
    #[error("{message}")]
    Validation {
        /// Definition whose value was rejected.
        subject: String,
        /// Message returned by the validator.
        message: String,
    },

    /// A token looked like an option but matched no pending definition.
    #[error("Unknown option {token}")]
    UnknownOption {
        /// The unmatched token.
        token: String,
    },

    /// A bare token found no pending argument or command.
    #[error("Unknown argument '{token}'")]
    UnknownArgument {
        /// The unmatched token.
        token: String,
    },

    /// A definition occurred fewer times than its lower bound.
    #[error("{}", mandatory_message(.subject, *.min_occurs))]
    MissingMandatory {
        /// Definition that was not supplied often enough.
        subject: String,
        /// Minimum number of occurrences required.
        min_occurs: usize,
    },

    /// A whole-configuration check rejected the final configuration.
    #[error("{message}")]
    ConfigCheck {
        /// Message returned by the check.
        message: String,
    },
}

impl ParseError {
    /// Whether this diagnostic reports an unrecognised token.
    ///
    /// Such diagnostics are downgraded to warnings when the parser is told
    /// not to fail on unknown arguments.
    #[must_use]
    pub const fn is_unrecognised(&self) -> bool {
        matches!(self, Self::UnknownOption { .. } | Self::UnknownArgument { .. })
    }
}

fn mandatory_message(subject: &str, min_occurs: usize) -> String {
    if min_occurs == 1 {
        format!("Missing {subject}")
    } else {
        format!("{} must be given {min_occurs} times", capitalize(subject))
    }
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
