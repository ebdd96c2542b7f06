use thiserror::Error;

/// Errors returned by the `DataForSEO` API client.
#[derive(Debug, Error)]
pub enum DataForSeoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx HTTP status.
    #[error("Error fetching {operation}: {status}")]
    Status { operation: &'static str, status: u16 },

    /// The envelope or task carried a `status_code` other than `20000`.
    #[error("DataForSEO API Error: {message} ({code})")]
    Api { code: u32, message: String },

    /// No task, or a task without any result, came back.
    #[error("No results returned from API")]
    EmptyResult,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
