//! Submission and search services.
//!
//! Both are thin async functions over a [`FoodStore`](crate::store::FoodStore):
//! the store is passed in, never reached through global state.

mod search;
mod submission;

pub use search::{FilterOptions, filter_options, search, tag_vocabulary};
pub use submission::{SubmitOutcome, submit, submit_on};
