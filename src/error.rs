use thiserror::Error;

/// Fault classes for the backing store and the JSON codec around it.
///
/// [`PersistentCell`](crate::PersistentCell) recovers from every one of these
/// internally; the type is public so that custom
/// [`Storage`](crate::Storage) implementations can produce them.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("stored value could not be decoded: {0}")]
    Decode(String),
    #[error("value could not be encoded: {0}")]
    Encode(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("storage remove failed: {0}")]
    Remove(String),
}
