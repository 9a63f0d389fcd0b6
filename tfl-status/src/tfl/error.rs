//! Transit API error types.

/// Errors from the transit API client.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request URL could not be built
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The requested resource doesn't exist
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Rate limited by the API
    #[error("rate limited by the transit API")]
    RateLimited,

    /// Invalid or missing application key
    #[error("unauthorized: check TFL_APP_KEY")]
    Unauthorized,
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
