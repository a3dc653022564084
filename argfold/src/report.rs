//! Caller-supplied sinks for diagnostics, usage text and termination.
//!
//! The parser never writes to a console or ends the process itself. It hands
//! text to a [`Reporter`] and, when a help or version option fires, asks a
//! [`Terminator`] to end the run.

use parking_lot::Mutex;

/// Receives displayed text and diagnostic lines.
///
/// Implementations must tolerate calls from any thread holding the parser.
pub trait Reporter: Send + Sync {
    /// Shows text the user asked for, such as usage or version output.
    fn display_out(&self, text: &str);

    /// Shows text describing a problem.
    fn display_err(&self, text: &str);

    /// Reports an error diagnostic.
    fn report_error(&self, message: &str) {
        self.display_err(&format!("Error: {message}"));
    }

    /// Reports a warning diagnostic.
    fn report_warning(&self, message: &str) {
        self.display_err(&format!("Warning: {message}"));
    }
}

/// Outcome a [`Terminator`] is asked to end the run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    /// The run ended normally, e.g. after printing help.
    Success,
    /// The run ended because of a failure.
    Failure,
}

/// Hook invoked synchronously by help and version options.
///
/// The hook is expected to end the process or otherwise abandon the parse.
/// When it returns, parsing continues with the next token.
pub trait Terminator: Send + Sync {
    /// Ends the run with `state`.
    fn terminate(&self, state: ExitState);
}

/// Terminator that exits the process with status 0 or 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitProcess;

impl Terminator for ExitProcess {
    fn terminate(&self, state: ExitState) {
        let code = match state {
            ExitState::Success => 0,
            ExitState::Failure => 1,
        };
        std::process::exit(code);
    }
}

/// Terminator that returns immediately so the parse carries on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTerminate;

impl Terminator for NoTerminate {
    fn terminate(&self, _state: ExitState) {}
}

/// Default reporter forwarding everything to `tracing`.
///
/// Displayed text becomes `info` events, errors `error` events and warnings
/// `warn` events, all under the `argfold` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn display_out(&self, text: &str) {
        tracing::info!(target: "argfold", "{text}");
    }

    fn display_err(&self, text: &str) {
        tracing::warn!(target: "argfold", "{text}");
    }

    fn report_error(&self, message: &str) {
        tracing::error!(target: "argfold", "{message}");
    }

    fn report_warning(&self, message: &str) {
        tracing::warn!(target: "argfold", "{message}");
    }
}

/// Stream a [`BufferedReporter`] line was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Requested output.
    Out,
    /// Diagnostics.
    Err,
}

/// Reporter that records every line for later inspection.
///
/// # Examples
///
/// ```
/// use argfold::{BufferedReporter, Channel, Reporter};
/// let reporter = BufferedReporter::new();
/// reporter.report_error("boom");
/// assert_eq!(reporter.lines(), vec![(Channel::Err, "Error: boom".to_owned())]);
/// ```
#[derive(Debug, Default)]
pub struct BufferedReporter {
    lines: Mutex<Vec<(Channel, String)>>,
}

impl BufferedReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded line with its channel, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().clone()
    }

    /// Text written to `channel`, in order.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(written, _)| *written == channel)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Removes and returns every recorded line.
    #[must_use]
    pub fn take(&self) -> Vec<(Channel, String)> {
        std::mem::take(&mut *self.lines.lock())
    }

    fn push(&self, channel: Channel, text: &str) {
        self.lines.lock().push((channel, text.to_owned()));
    }
}

impl Reporter for BufferedReporter {
    fn display_out(&self, text: &str) {
        self.push(Channel::Out, text);
    }

    fn display_err(&self, text: &str) {
        self.push(Channel::Err, text);
    }
}
