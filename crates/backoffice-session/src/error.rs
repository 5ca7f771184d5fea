//! Error types for session storage.

/// Error type for session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing the storage file failed.
    #[error("storage I/O error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The storage file is not a JSON object of strings.
    #[error("corrupt storage file '{path}': {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session storage operations.
pub type Result<T> = std::result::Result<T, Error>;
