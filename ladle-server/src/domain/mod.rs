//! Core domain types for the food board.
//!
//! Submissions, their price tags and search filters, plus the MRT station
//! reference data they point at. Nothing in here does I/O.

mod filters;
mod price;
mod station;
mod submission;

pub use filters::{ANY, SearchFilters};
pub use price::{InvalidPriceTag, PriceTag};
pub use station::{Coordinates, NearbyStation, Station};
pub use submission::{
    NewSubmission, SubmissionForm, SubmissionId, SubmissionSummary, distinct_stations,
    normalize_author, normalize_tags, split_tags,
};
