//! The option parser: registry owner, parse entry points and usage helpers.

use std::fmt;
use std::sync::Arc;

use crate::registry::Registry;
use crate::report::{ExitProcess, Reporter, Terminator, TracingReporter};
use crate::{DefId, Definition, ParseErrors, ParserSettings, UsageOnError, usage};

mod pending;
mod state;

use state::{Outcome, ParseState, Severity};

/// Declarative parser folding command-line tokens into a configuration `C`.
///
/// Definitions are registered through the builder entry points
/// ([`OptionParser::opt`], [`OptionParser::arg`], [`OptionParser::cmd`] and
/// friends) before any parse. Parsing borrows the parser immutably, so a
/// fully built parser can be shared between threads.
///
/// # Examples
///
/// ```
/// use argfold::OptionParser;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Config {
///     foo: i32,
///     verbose: bool,
///     names: Vec<String>,
/// }
///
/// let mut parser = OptionParser::<Config>::new("demo");
/// parser
///     .opt::<i32>("foo")
///     .abbr("f")
///     .action(|foo, c| Config { foo, ..c });
/// parser
///     .opt::<()>("verbose")
///     .action(|(), c| Config { verbose: true, ..c });
/// parser
///     .arg::<String>("name")
///     .unbounded()
///     .action(|name, mut c| {
///         c.names.push(name);
///         c
///     });
///
/// let config = parser.parse_default(["-f", "5", "--verbose", "alice", "bob"]);
/// assert_eq!(
///     config,
///     Some(Config {
///         foo: 5,
///         verbose: true,
///         names: vec!["alice".into(), "bob".into()],
///     })
/// );
/// ```
pub struct OptionParser<C> {
    pub(crate) program_name: String,
    pub(crate) registry: Registry<C>,
    pub(crate) help_ids: Vec<DefId>,
    settings: ParserSettings,
    reporter: Arc<dyn Reporter>,
    terminator: Arc<dyn Terminator>,
}

impl<C> OptionParser<C> {
    /// Creates an empty parser for `program_name`.
    ///
    /// Diagnostics go to a [`TracingReporter`] and help/version output ends
    /// the process through [`ExitProcess`] until other sinks are attached.
    #[must_use]
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            registry: Registry::new(),
            help_ids: Vec::new(),
            settings: ParserSettings::default(),
            reporter: Arc::new(TracingReporter),
            terminator: Arc::new(ExitProcess),
        }
    }

    /// Replaces the parser settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ParserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sends displayed text and diagnostics to `reporter`.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Uses `terminator` when help or version output asks to end the run.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Program name shown in the usage line.
    #[must_use]
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Registered definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition<C>> {
        self.registry.iter()
    }

    /// Looks up a registered definition.
    #[must_use]
    pub fn definition(&self, id: DefId) -> Option<&Definition<C>> {
        self.registry.get(id)
    }

    /// Header lines registered with [`OptionParser::head`].
    #[must_use]
    pub fn header(&self) -> String {
        usage::header(&self.registry)
    }

    /// Full usage text in the configured layout.
    #[must_use]
    pub fn usage(&self) -> String {
        usage::render(&self.registry, &self.program_name, &self.settings)
    }

    /// Displays the usage text as requested output.
    pub fn show_usage(&self) {
        self.reporter.display_out(&self.usage());
    }

    /// Displays the usage text as diagnostic output.
    pub fn show_usage_as_error(&self) {
        self.reporter.display_err(&self.usage());
    }

    /// Displays the short hint pointing at the help option.
    pub fn show_try_help(&self) {
        let help = self
            .help_ids
            .iter()
            .find_map(|id| self.registry.get(*id))
            .map_or_else(|| "--help".to_owned(), Definition::full_name);
        self.reporter
            .display_err(&format!("Try {help} for more information."));
    }

    /// Parses `args` starting from `init`.
    ///
    /// Every diagnostic is reported through the reporter. On failure the
    /// usage-on-error policy decides what else is shown and `None` is
    /// returned.
    #[must_use]
    pub fn parse<I, S>(&self, args: I, init: C) -> Option<C>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let outcome = self.run(args, init);
        let mut failed = false;
        for (severity, error) in &outcome.diagnostics {
            match severity {
                Severity::Error => {
                    failed = true;
                    self.reporter.report_error(&error.to_string());
                }
                Severity::Warning => self.reporter.report_warning(&error.to_string()),
            }
        }
        if failed {
            self.show_usage_on_error();
            None
        } else {
            Some(outcome.config)
        }
    }

    /// Parses `args` starting from `C::default()`.
    #[must_use]
    pub fn parse_default<I, S>(&self, args: I) -> Option<C>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        C: Default,
    {
        self.parse(args, C::default())
    }

    /// Parses `args` starting from `init`, returning the errors instead of
    /// reporting them.
    ///
    /// Warnings are still sent to the reporter. Nothing else is displayed on
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns every error diagnostic of the parse, in discovery order.
    pub fn try_parse<I, S>(&self, args: I, init: C) -> Result<C, ParseErrors>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let outcome = self.run(args, init);
        let mut errors = Vec::new();
        for (severity, error) in outcome.diagnostics {
            match severity {
                Severity::Error => errors.push(error),
                Severity::Warning => self.reporter.report_warning(&error.to_string()),
            }
        }
        if errors.is_empty() {
            Ok(outcome.config)
        } else {
            Err(ParseErrors::new(errors))
        }
    }

    fn run<I, S>(&self, args: I, init: C) -> Outcome<C>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = args.into_iter().collect();
        let tokens: Vec<&str> = owned.iter().map(AsRef::as_ref).collect();
        ParseState::new(self).run(&tokens, init)
    }

    fn show_usage_on_error(&self) {
        match self.settings.usage_on_error {
            UsageOnError::Auto if self.help_ids.is_empty() => self.show_usage_as_error(),
            UsageOnError::Auto | UsageOnError::TryHelp => self.show_try_help(),
            UsageOnError::Full => self.show_usage_as_error(),
            UsageOnError::Silent => {}
        }
    }

    pub(crate) fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub(crate) fn terminator(&self) -> &dyn Terminator {
        self.terminator.as_ref()
    }
}

impl<C> fmt::Debug for OptionParser<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionParser")
            .field("program_name", &self.program_name)
            .field("definitions", &self.registry.iter().collect::<Vec<_>>())
            .field("settings", &self.settings)
            .field("reporter", &"<reporter>")
            .field("terminator", &"<terminator>")
            .finish()
    }
}
