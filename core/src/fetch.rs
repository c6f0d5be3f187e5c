use reqwest::header::REFERER;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::SuggestConfig;
use crate::error::FetchError;
use crate::parse::parse_suggestions;

/// Performs one suggestion request per job, off the consumer side.
///
/// Cancellation is cooperative: the token is polled before connecting (C0),
/// after the response headers arrive (C1), and after parsing (C2). A read
/// that is already blocking is bounded only by the client's read timeout,
/// not by the token.
pub struct SuggestionFetcher {
    client: reqwest::Client,
    config: SuggestConfig,
}

impl SuggestionFetcher {
    pub fn new(config: SuggestConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetches and parses suggestions for `query`.
    ///
    /// The returned list is in document order and may be empty; the result
    /// policy (placeholder and error entries) lives in [`Self::run`].
    pub async fn fetch(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let url = Url::parse_with_params(
            &self.config.endpoint,
            [("output", "toolbar"), ("q", query)],
        )?;
        let response = self
            .client
            .get(url)
            .header(REFERER, self.config.referer.as_str())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let body = response.text().await?;
        let suggestions = parse_suggestions(&body)?;

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        Ok(suggestions)
    }

    /// Runs one fetch and applies the result policy: any failure (including
    /// cancellation) becomes a one-element message list and partial content
    /// is discarded; an empty success becomes the no-results placeholder.
    ///
    /// Never returns an error; the worker always hands a displayable list
    /// back to the dispatcher.
    pub async fn run(&self, query: &str, cancel: &CancellationToken) -> Vec<String> {
        match self.fetch(query, cancel).await {
            Ok(suggestions) if suggestions.is_empty() => {
                vec![self.config.no_results_text.clone()]
            }
            Ok(suggestions) => suggestions,
            Err(err) => {
                tracing::warn!("suggestion fetch for {query:?} failed: {err}");
                vec![format!("{} {err}", self.config.error_prefix)]
            }
        }
    }
}
