use std::time::Duration;

/// Knobs for a suggestion session.
///
/// The defaults mirror the Google toolbar suggest endpoint; tests point
/// `endpoint` at a local mock server and shrink `quiet_period`.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Base URL of the suggestion endpoint. `output=toolbar` and the encoded
    /// query are appended as query parameters.
    pub endpoint: String,
    /// Value of the `Referer` header sent with every request.
    pub referer: String,
    /// How long the input must stay unchanged before a fetch is dispatched.
    pub quiet_period: Duration,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Single synthetic entry shown when the response carried no suggestions.
    pub no_results_text: String,
    /// Prefix for the single synthetic entry shown when a fetch failed.
    pub error_prefix: String,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://google.com/complete/search".to_string(),
            referer: "http://www.pragprog.com/book/eband4".to_string(),
            quiet_period: Duration::from_millis(1000),
            connect_timeout: Duration::from_millis(1500),
            read_timeout: Duration::from_millis(1000),
            no_results_text: "(no suggestions)".to_string(),
            error_prefix: "Error:".to_string(),
        }
    }
}
