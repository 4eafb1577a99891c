//! Storage error types.

/// Errors from the submission store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection, pool or query failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A selected station name matched no row in the reference table
    #[error("unknown MRT station: {0}")]
    UnknownStation(String),

    /// A stored row could not be mapped to the domain model
    #[error("invalid stored row: {0}")]
    InvalidRow(String),

    /// The store is not accepting requests
    #[error("storage unavailable")]
    Unavailable,
}
