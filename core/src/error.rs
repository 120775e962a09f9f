use thiserror::Error;

/// Failures surfaced by the search fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx status; message is the serialized JSON error body or a raw snippet
    #[error("Request failed {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// 2xx status but the body is not JSON
    #[error("Expected JSON but got content-type={content_type}. Body (truncated): {snippet}")]
    InvalidResponse {
        snippet: String,
        content_type: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),
}

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid page size {0}, expected one of 15, 20, 25, 30, 40, 50")]
    InvalidPageSize(u32),

    #[error("Unknown filter '{0}', expected one of title, cuisine, rating, total_time, calories")]
    UnknownFilter(String),
}
