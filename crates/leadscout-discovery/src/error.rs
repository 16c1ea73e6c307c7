use thiserror::Error;

/// Failure of a single discovery stage.
///
/// Stages return these so tests and logs can see why a candidate was dropped;
/// the public entry points convert them into their documented sentinels.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("search provider error: {0}")]
    SearchApi(String),

    #[error("language model error: {0}")]
    LanguageModel(String),

    #[error("could not parse model response: {0}")]
    Parse(String),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("timed out after {secs}s processing {url}")]
    Timeout { url: String, secs: u64 },
}
