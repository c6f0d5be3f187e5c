/// Coarse progress states reported to the sink around a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// A fetch was accepted and is about to run.
    Working,
    /// A fetch could not be started (worker saturated or gone).
    Error,
}

/// Capability interface the dispatcher reports through.
///
/// Implemented by whatever presentation layer owns the session; the core
/// never renders anything itself. `on_results` replaces the currently
/// displayed list wholesale — it may be a one-element error or placeholder
/// list, never data and error mixed.
pub trait ResultSink: Send + Sync + 'static {
    fn on_status(&self, status: FetchStatus);

    fn on_results(&self, suggestions: &[String]);

    /// Called when the user picks a displayed entry. The core's obligation
    /// ends at forwarding the chosen literal string; what happens next is
    /// the presentation layer's business.
    fn on_suggestion_chosen(&self, text: &str);
}
