//! Error types for the fish API clients.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! record does not exist" from "the server returned an unexpected status."
//! All other non-2xx responses land in `HttpError` with the raw status code
//! and body for debugging. Network failures never reach a status code and
//! are reported as `TransportError`.

/// Errors returned by every `FishApiClient` implementation and by the
/// `FishClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No record with the requested id exists.
    #[error("fish not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connect, read, timeout).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The input violates the record invariants.
    #[error("invalid input: {0}")]
    ValidationError(String),
}
