use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot is corrupted: {0}")]
    Corruption(String),

    #[error("unsupported snapshot version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
