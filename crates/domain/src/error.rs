//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MockStoreError`] via `#[from]`.

/// Base error returned by every store operation.
#[derive(Debug, thiserror::Error)]
pub enum MockStoreError {
    /// The request payload was rejected at the boundary.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The referenced collection or record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Reading or writing the persisted datastore failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload problems detected before touching the mirror.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The payload is valid JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The request body could not be decoded at all.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A path parameter could not be decoded.
    #[error("malformed request path: {0}")]
    MalformedPath(String),
}

/// Lookup failures, rendered as the `error` message of a 404 response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    /// No record with the requested id exists.
    #[error("{kind} not found")]
    Record {
        /// Human-readable record kind (`Data`, `Category`, …).
        kind: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The datastore has no collection with this name.
    #[error("Collection {name} not found")]
    Collection {
        /// Key of the collection in the persisted file.
        name: &'static str,
    },
}
