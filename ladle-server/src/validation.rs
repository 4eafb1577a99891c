//! Form validation.
//!
//! Validation failures are user-facing messages, not errors: the form is
//! re-rendered with them and nothing is written.

use crate::domain::{SubmissionForm, distinct_stations};

/// Minimum length of a venue or author name, after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Maximum length of a venue name, after trimming.
pub const MAX_NAME_CHARS: usize = 250;

/// Maximum length of the recommendation text.
pub const MAX_RECOMMENDATION_CHARS: usize = 500;

/// Maximum number of stations a submission may be tied to.
pub const MAX_STATIONS: usize = 2;

/// Check the venue and author names.
///
/// The author is optional: a blank author is not checked.
pub fn validate(name: &str, author: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().chars().count() < MIN_NAME_CHARS {
        errors.push("Name must be at least 2 characters".to_string());
    }

    if !author.is_empty() && author.trim().chars().count() < MIN_NAME_CHARS {
        errors.push("Author name must be at least 2 characters".to_string());
    }

    errors
}

/// Check a whole submit form.
///
/// Runs [`validate`] first, then the station count and length limits.
pub fn validate_submission(form: &SubmissionForm) -> Vec<String> {
    let mut errors = validate(&form.name, &form.author);

    if form.name.trim().chars().count() > MAX_NAME_CHARS {
        errors.push("Name must be at most 250 characters".to_string());
    }

    let stations = distinct_stations(&form.stations);
    if stations.is_empty() {
        errors.push("Please select at least one MRT station.".to_string());
    } else if stations.len() > MAX_STATIONS {
        errors.push("Please select a maximum of 2 MRT stations.".to_string());
    }

    if form.recommendations.trim().chars().count() > MAX_RECOMMENDATION_CHARS {
        errors.push("Recommendations must be at most 500 characters".to_string());
    }

    errors
}
