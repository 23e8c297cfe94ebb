//! Error types for detection-event storage.

/// Errors that can occur during detection store operations.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// A database operation failed.
    #[error("detection store database error: {0}")]
    Database(#[from] rusqlite::Error),
}
