//! Error types for the aggregation layer.

/// Errors that can occur while computing dashboard aggregates.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A database operation failed.
    #[error("stats database error: {0}")]
    Database(#[from] rusqlite::Error),
}
