use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{provider} returned a non-JSON response")]
    NonJsonResponse { provider: &'static str, body: String },

    #[error("{0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, FarmError>;
