use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Corrupt data in '{0}': {1}")]
    Corrupt(String, String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
