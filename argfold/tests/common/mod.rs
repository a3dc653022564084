//! Shared fixtures for the integration tests.

use std::sync::Arc;

use argfold::{BufferedReporter, ExitState, OptionParser, Terminator};
use parking_lot::Mutex;

/// Terminator remembering every exit request instead of exiting.
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    requests: Mutex<Vec<ExitState>>,
}

impl RecordingTerminator {
    pub fn requests(&self) -> Vec<ExitState> {
        self.requests.lock().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, state: ExitState) {
        self.requests.lock().push(state);
    }
}

/// Sinks attached to a parser under test.
pub struct Harness {
    pub reporter: Arc<BufferedReporter>,
    pub terminator: Arc<RecordingTerminator>,
}

/// Routes the output of `parser` into fresh in-memory sinks.
pub fn harness<C>(parser: OptionParser<C>) -> (OptionParser<C>, Harness) {
    let reporter = Arc::new(BufferedReporter::new());
    let terminator = Arc::new(RecordingTerminator::default());
    let wired = parser
        .with_reporter(reporter.clone())
        .with_terminator(terminator.clone());
    (
        wired,
        Harness {
            reporter,
            terminator,
        },
    )
}
