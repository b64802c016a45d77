//! Error types for storage collaborators.

use thiserror::Error;

/// Errors that can occur while reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entity could not be encoded.
    #[error("Store serialization error: {0}")]
    Serialization(String),

    /// The persisted snapshot could not be decoded.
    #[error("Store deserialization error: {0}")]
    Deserialization(String),
}
