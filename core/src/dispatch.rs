//! Single-flight dispatch between settled input and the fetch worker.
//!
//! [`Dispatcher`] is an actor owning the one `PendingOperation` slot and the
//! operation id counter; everything reaches it over channels, so no locks
//! guard that state. The fetch worker is a single task draining a depth-1
//! job queue, which is what bounds concurrency: one job executing, at most
//! one queued behind it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::SubmissionRejected;
use crate::fetch::SuggestionFetcher;
use crate::sink::FetchStatus;
use crate::sink::ResultSink;

/// One in-flight fetch. At most one of these is alive at a time; it is
/// dropped once its result is delivered or it is superseded.
struct PendingOperation {
    id: u64,
    cancel: CancellationToken,
}

pub(crate) struct FetchJob {
    pub(crate) id: u64,
    pub(crate) query: String,
    pub(crate) cancel: CancellationToken,
}

pub(crate) struct FetchOutcome {
    pub(crate) id: u64,
    pub(crate) suggestions: Vec<String>,
}

pub(crate) struct Dispatcher {
    settled_rx: mpsc::UnboundedReceiver<String>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    job_tx: mpsc::Sender<FetchJob>,
    sink: Arc<dyn ResultSink>,
    current: Option<PendingOperation>,
    next_id: u64,
}

impl Dispatcher {
    pub(crate) fn new(
        settled_rx: mpsc::UnboundedReceiver<String>,
        outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
        job_tx: mpsc::Sender<FetchJob>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            settled_rx,
            outcome_rx,
            job_tx,
            sink,
            current: None,
            next_id: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                settled = self.settled_rx.recv() => {
                    let Some(text) = settled else {
                        break;
                    };
                    self.on_settled_input(&text);
                }
                outcome = self.outcome_rx.recv() => {
                    let Some(outcome) = outcome else {
                        break;
                    };
                    self.on_fetch_outcome(outcome);
                }
            }
        }
        // Session teardown: stop whatever is still running. Dropping
        // `job_tx` shuts the worker down in turn.
        if let Some(operation) = self.current.take() {
            operation.cancel.cancel();
        }
    }

    /// Handles one debounced input.
    fn on_settled_input(&mut self, text: &str) {
        let query = text.trim();

        // Cancellation is cooperative and best-effort: the old task may run
        // until its next checkpoint, but its id is no longer current, so any
        // late outcome is dropped by the staleness guard.
        if let Some(previous) = self.current.take() {
            previous.cancel.cancel();
        }

        if query.is_empty() {
            // Nothing to fetch; whatever is displayed stays as-is.
            return;
        }

        self.sink.on_status(FetchStatus::Working);

        self.next_id += 1;
        let id = self.next_id;
        let cancel = CancellationToken::new();
        match self.try_submit(id, query, cancel.clone()) {
            Ok(()) => self.current = Some(PendingOperation { id, cancel }),
            Err(err) => {
                tracing::warn!("could not dispatch fetch for {query:?}: {err}");
                self.sink.on_status(FetchStatus::Error);
            }
        }
    }

    fn try_submit(
        &mut self,
        id: u64,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<(), SubmissionRejected> {
        let job = FetchJob {
            id,
            query: query.to_string(),
            cancel,
        };
        self.job_tx.try_send(job).map_err(|_| SubmissionRejected)
    }

    /// Staleness guard: a result is delivered only if its operation is still
    /// the registered one; results for superseded operations are suppressed
    /// regardless of arrival order.
    fn on_fetch_outcome(&mut self, outcome: FetchOutcome) {
        match &self.current {
            Some(operation) if operation.id == outcome.id => {
                self.current = None;
                self.sink.on_results(&outcome.suggestions);
            }
            _ => {
                tracing::trace!("dropping stale suggestion result for operation {}", outcome.id);
            }
        }
    }
}

/// Drains the job queue one fetch at a time and hands each outcome back to
/// the dispatcher. Exits when the dispatcher drops the job sender.
pub(crate) async fn fetch_worker(
    fetcher: Arc<SuggestionFetcher>,
    mut job_rx: mpsc::Receiver<FetchJob>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
) {
    while let Some(job) = job_rx.recv().await {
        let suggestions = fetcher.run(&job.query, &job.cancel).await;
        let outcome = FetchOutcome {
            id: job.id,
            suggestions,
        };
        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
}
