//! Behavioural settings of an [`crate::OptionParser`].
//!
//! Settings derive `serde` traits so applications can keep them alongside
//! their own configuration files.

use serde::{Deserialize, Serialize};

/// What to show after reporting the errors of a failed parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageOnError {
    /// A "try --help" hint when a help option exists, full usage otherwise.
    #[default]
    Auto,
    /// Always the full usage text.
    Full,
    /// Always the short "try --help" hint.
    TryHelp,
    /// Nothing beyond the diagnostics.
    Silent,
}

/// Layout of rendered usage text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageLayout {
    /// Each signature followed by its description on an indented line.
    OneColumn,
    /// Signatures padded to a shared column with descriptions alongside.
    #[default]
    TwoColumns,
}

/// Parser behaviour that is independent of the registered definitions.
///
/// # Examples
///
/// ```
/// use argfold::{ParserSettings, UsageLayout};
/// let settings = ParserSettings {
///     layout: UsageLayout::OneColumn,
///     ..ParserSettings::default()
/// };
/// assert!(settings.error_on_unknown_argument);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Treat unknown options and arguments as errors rather than warnings.
    pub error_on_unknown_argument: bool,
    /// What to show after the diagnostics of a failed parse.
    pub usage_on_error: UsageOnError,
    /// Layout of usage text.
    pub layout: UsageLayout,
    /// Widest signature column used by [`UsageLayout::TwoColumns`].
    pub max_signature_width: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            error_on_unknown_argument: true,
            usage_on_error: UsageOnError::Auto,
            layout: UsageLayout::TwoColumns,
            max_signature_width: 30,
        }
    }
}
