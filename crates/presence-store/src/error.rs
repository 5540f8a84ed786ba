use thiserror::Error;

/// Errors returned when saving an analysis session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid Supabase URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The insert was rejected; `message` is the `PostgREST` error message
    /// when the body carried one.
    #[error("insert into {table} failed with {status}: {message}")]
    Insert {
        table: String,
        status: u16,
        message: String,
    },
}
