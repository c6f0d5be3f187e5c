//! Input debouncing for the suggestion pipeline.
//!
//! [`InputDebouncer`] is the non-blocking handle the consumer side calls on
//! every raw input change. Internally it spawns a [`DebounceScheduler`] task
//! that resets a quiet-period deadline on each input and forwards exactly the
//! latest text as one settled event once the deadline fires.
//!
//! This follows the actor-style design from
//! [“Actors with Tokio”](https://ryhl.io/blog/actors-with-tokio/), with a
//! dedicated scheduler task and a lightweight handle.

use std::time::Duration;
use std::time::Instant;

use tokio::sync::mpsc;

/// Handle for feeding raw input into the debouncer.
///
/// `on_input` never blocks. Dropping the last handle closes the input
/// channel and the scheduler exits without firing any pending callback, so
/// nothing is delivered after teardown.
#[derive(Clone, Debug)]
pub(crate) struct InputDebouncer {
    input_tx: mpsc::UnboundedSender<String>,
}

impl InputDebouncer {
    /// Spawns the scheduler task. Settled events are sent on `settled_tx`
    /// after `quiet_period` of input silence.
    pub(crate) fn new(quiet_period: Duration, settled_tx: mpsc::UnboundedSender<String>) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let scheduler = DebounceScheduler {
            input_rx,
            settled_tx,
            quiet_period,
        };
        tokio::spawn(scheduler.run());
        Self { input_tx }
    }

    pub(crate) fn on_input(&self, text: impl Into<String>) {
        let _ = self.input_tx.send(text.into());
    }
}

struct DebounceScheduler {
    input_rx: mpsc::UnboundedReceiver<String>,
    settled_tx: mpsc::UnboundedSender<String>,
    quiet_period: Duration,
}

impl DebounceScheduler {
    /// Coalesces input bursts: N inputs arriving within the quiet period of
    /// each other produce exactly one settled event carrying the last text.
    async fn run(mut self) {
        const IDLE: Duration = Duration::from_secs(60 * 60 * 24 * 365);
        let mut pending: Option<String> = None;
        let mut deadline: Option<Instant> = None;
        loop {
            let target = deadline.unwrap_or_else(|| Instant::now() + IDLE);
            let quiet = tokio::time::sleep_until(target.into());
            tokio::pin!(quiet);

            tokio::select! {
                // The closed-channel check must win over an elapsed deadline,
                // otherwise a pending event could fire after teardown.
                biased;
                input = self.input_rx.recv() => {
                    let Some(text) = input else {
                        break;
                    };
                    pending = Some(text);
                    deadline = Some(Instant::now() + self.quiet_period);
                }
                _ = &mut quiet => {
                    deadline = None;
                    if let Some(text) = pending.take()
                        && self.settled_tx.send(text).is_err()
                    {
                        // Downstream gone; nothing left to debounce for.
                        break;
                    }
                }
            }
        }
    }
}
