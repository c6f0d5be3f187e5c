use thiserror::Error;

/// Errors produced on the fetch path.
///
/// All of these are converted into a one-element message list by
/// `SuggestionFetcher::run` before they reach the worker's output channel;
/// none of them crosses back to the consumer side as an `Err`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid suggestion endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("malformed suggestion markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed suggestion attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("cancelled by newer input")]
    Cancelled,
}

/// The bounded fetch worker could not accept another job, either because its
/// queue is full or because the worker task is gone.
#[derive(Debug, Error)]
#[error("suggestion worker rejected the submission")]
pub struct SubmissionRejected;
