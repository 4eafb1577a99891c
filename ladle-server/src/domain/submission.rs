//! Submission types and intake normalization.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::PriceTag;

/// Database identifier of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(pub i64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw input from the submit form, exactly as the user typed it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionForm {
    pub name: String,
    /// Comma-separated cuisine tags.
    pub tags: String,
    pub price_tag: PriceTag,
    pub author: String,
    /// Selected station names, in selection order.
    pub stations: Vec<String>,
    pub recommendations: String,
}

/// A validated, normalized submission ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub tags: String,
    pub price_tag: PriceTag,
    pub author: Option<String>,
    pub recommendations: Option<String>,
    pub date_submitted: NaiveDate,
    /// One or two distinct station names.
    pub stations: Vec<String>,
}

impl NewSubmission {
    /// Normalize a form for storage.
    ///
    /// Does not validate; callers run the form through
    /// [`crate::validation::validate_submission`] first.
    pub fn from_form(form: &SubmissionForm, date_submitted: NaiveDate) -> Self {
        Self {
            name: form.name.trim().to_string(),
            tags: normalize_tags(&form.tags),
            price_tag: form.price_tag,
            author: normalize_author(&form.author),
            recommendations: non_empty(form.recommendations.trim()),
            date_submitted,
            stations: distinct_stations(&form.stations),
        }
    }
}

/// One search result: a submission with its stations aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionSummary {
    pub id: SubmissionId,
    pub name: String,
    pub tags: String,
    pub price_tag: PriceTag,
    pub author: Option<String>,
    pub recommendations: Option<String>,
    pub date_submitted: NaiveDate,
    /// Station names, sorted.
    pub stations: Vec<String>,
}

/// Lowercase and trim each comma-separated tag, dropping empty entries.
///
/// ```
/// use ladle_server::domain::normalize_tags;
///
/// assert_eq!(normalize_tags(" Chinese , Vegetarian,,"), "chinese,vegetarian");
/// ```
pub fn normalize_tags(raw: &str) -> String {
    split_tags(raw)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(",")
}

/// Split a stored tags string into its trimmed, non-empty entries.
pub fn split_tags(stored: &str) -> impl Iterator<Item = &str> {
    stored.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Lowercase and trim an author name. Blank names become `None`.
pub fn normalize_author(raw: &str) -> Option<String> {
    non_empty(&raw.trim().to_lowercase())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Trimmed station names with blanks and repeats removed, first pick wins.
pub fn distinct_stations(stations: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(stations.len());
    for station in stations.iter().map(|s| s.trim()) {
        if !station.is_empty() && !out.iter().any(|s| s == station) {
            out.push(station.to_string());
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalized tags never contain uppercase letters, blank entries,
        /// or padding around commas.
        #[test]
        fn normalized_tags_are_canonical(raw in "[a-zA-Z ,]{0,40}") {
            let tags = normalize_tags(&raw);
            prop_assert_eq!(tags.to_lowercase(), tags.clone());
            if !tags.is_empty() {
                for entry in tags.split(',') {
                    prop_assert!(!entry.is_empty());
                    prop_assert_eq!(entry.trim(), entry);
                }
            }
        }

        /// Normalizing twice changes nothing.
        #[test]
        fn normalize_tags_is_idempotent(raw in "[a-zA-Z ,]{0,40}") {
            let once = normalize_tags(&raw);
            prop_assert_eq!(normalize_tags(&once), once);
        }

        /// A stored author is always trimmed lowercase and never blank.
        #[test]
        fn normalized_author_is_lowercase(raw in "[a-zA-Z ]{0,20}") {
            match normalize_author(&raw) {
                Some(author) => {
                    prop_assert_eq!(author.to_lowercase(), author.clone());
                    prop_assert_eq!(author.trim(), author.as_str());
                    prop_assert!(!author.is_empty());
                }
                None => prop_assert!(raw.trim().is_empty()),
            }
        }
    }
}
