//! Coordination core for live auto-completion.
//!
//! Sits between raw input events and a slow, cancellable network fetch: an
//! input debouncer coalesces keystroke bursts, a single-flight dispatcher
//! guarantees at most one in-flight fetch and discards stale results, and a
//! fetch worker polls a cancellation token at defined checkpoints. Results
//! are reported through a [`ResultSink`] implemented by the presentation
//! layer; the core renders nothing itself.

mod config;
mod debounce;
mod dispatch;
mod error;
mod fetch;
mod parse;
mod sink;

use std::sync::Arc;

use tokio::sync::mpsc;

pub use config::SuggestConfig;
pub use error::FetchError;
pub use error::SubmissionRejected;
pub use fetch::SuggestionFetcher;
pub use sink::FetchStatus;
pub use sink::ResultSink;

use debounce::InputDebouncer;

/// Handle to a running suggestion session.
///
/// Dropping it closes the input channel; the debouncer, dispatcher, and
/// fetch worker shut down in cascade and any in-flight fetch is cancelled.
pub struct SuggestSession {
    debouncer: InputDebouncer,
    sink: Arc<dyn ResultSink>,
}

impl SuggestSession {
    /// Feed one raw input change. Never blocks; after the configured quiet
    /// period without further calls, the latest text is dispatched.
    pub fn on_input(&self, text: &str) {
        self.debouncer.on_input(text);
    }

    /// Forward a user selection to the sink.
    pub fn choose(&self, text: &str) {
        self.sink.on_suggestion_chosen(text);
    }
}

/// Wires up debouncer, dispatcher, and fetch worker for `config` and returns
/// the session handle. Must be called from within a tokio runtime.
pub fn create_session(
    config: SuggestConfig,
    sink: Arc<dyn ResultSink>,
) -> anyhow::Result<SuggestSession> {
    let fetcher = Arc::new(SuggestionFetcher::new(config.clone())?);

    let (settled_tx, settled_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    // One job executing, at most one queued behind it.
    let (job_tx, job_rx) = mpsc::channel(1);

    tokio::spawn(dispatch::fetch_worker(fetcher, job_rx, outcome_tx));
    let dispatcher = dispatch::Dispatcher::new(settled_rx, outcome_rx, job_tx, sink.clone());
    tokio::spawn(dispatcher.run());

    let debouncer = InputDebouncer::new(config.quiet_period, settled_tx);
    Ok(SuggestSession { debouncer, sink })
}
