//! Aggregation container for every [`ParseError`] of one failed parse.

use std::{error::Error, fmt};

use super::ParseError;

/// Ordered collection of the [`ParseError`]s produced by a single parse.
///
/// Parsing never stops at the first problem, so a failed parse yields every
/// diagnostic in the order it was discovered.
///
/// # Examples
///
/// ```
/// use argfold::{ParseError, ParseErrors};
/// let errors = ParseErrors::new(vec![
///     ParseError::UnknownOption { token: "--bogus".into() },
///     ParseError::MissingMandatory { subject: "argument file".into(), min_occurs: 1 },
/// ]);
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.to_string(), "1: Unknown option --bogus\n2: Missing argument file");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    /// Create an aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseError] {
        &self.0
    }

    /// Diagnostic lines, one per error, without numbering.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for ParseErrors {}

impl From<Vec<ParseError>> for ParseErrors {
    fn from(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
