//! Persistence for submissions and the MRT station reference table.
//!
//! [`FoodStore`] is the seam between the services and storage. [`PgStore`]
//! is the production implementation over a PostgreSQL connection pool;
//! [`MemoryStore`] keeps everything in process with the same semantics and
//! backs the test suite.

mod error;
mod memory;
mod postgres;
mod query;

use std::future::Future;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use query::SearchQuery;

use crate::domain::{NewSubmission, SearchFilters, Station, SubmissionId, SubmissionSummary};

/// Reads and writes needed by the submission and search services.
pub trait FoodStore: Send + Sync {
    /// Every station, with whatever coordinates are known, ordered by name.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, StoreError>> + Send;

    /// Station names for the select boxes, ordered by name.
    fn station_names(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Insert a submission and its station links atomically.
    ///
    /// Either the submission row and every link are committed, or nothing
    /// is. A station name with no reference row fails with
    /// [`StoreError::UnknownStation`].
    fn insert_submission(
        &self,
        submission: &NewSubmission,
    ) -> impl Future<Output = Result<SubmissionId, StoreError>> + Send;

    /// Fetch one submission with its stations.
    fn submission(
        &self,
        id: SubmissionId,
    ) -> impl Future<Output = Result<Option<SubmissionSummary>, StoreError>> + Send;

    /// The raw `tags` column of every submission.
    fn stored_tags(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Distinct non-null authors, in the order they first submitted.
    fn authors(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Submissions matching every active filter, newest first.
    fn search(
        &self,
        filters: &SearchFilters,
    ) -> impl Future<Output = Result<Vec<SubmissionSummary>, StoreError>> + Send;
}
