//! Persistence error types.

use thiserror::Error;

/// Errors raised by key-value stores and record (de)serialization.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store cannot be used at all (no backing medium).
    #[error("Storage is unavailable")]
    Unavailable,

    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be turned into JSON.
    #[error("Serialization failed for key '{key}': {source}")]
    SerializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record is not valid JSON of the expected shape.
    #[error("Deserialization failed for key '{key}': {source}")]
    DeserializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
