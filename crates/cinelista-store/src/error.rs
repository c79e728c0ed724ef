use thiserror::Error;

/// Failure of the key-value substrate itself
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a saved-content mutation. The previously persisted collection is left as it was.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not persist saved content: {0}")]
    Storage(#[from] StorageError),

    #[error("could not encode saved content: {0}")]
    Encode(#[from] serde_json::Error),
}
