//! Error types for the alerting layer.

/// Errors that can occur during alert store operations.
///
/// A resolve against an unknown alert ID is *not* an error — see
/// [`crate::ResolveOutcome::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// A database operation failed.
    #[error("alert store database error: {0}")]
    Database(#[from] rusqlite::Error),
}
