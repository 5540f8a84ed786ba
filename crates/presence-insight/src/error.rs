use thiserror::Error;

/// Errors returned by the Gemini insight client.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Non-2xx response; `message` is the API's error message when it sent one.
    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response carried no candidate text to parse.
    #[error("Gemini response contained no text")]
    EmptyResponse,

    /// The response body, or the generated JSON inside it, did not match the
    /// expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
