//! In-process store.
//!
//! Mirrors the PostgreSQL store's filtering, ordering and atomicity so the
//! services can be exercised without a database.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{NewSubmission, SearchFilters, Station, SubmissionId, SubmissionSummary};

use super::FoodStore;
use super::error::StoreError;

#[derive(Debug, Default)]
struct Tables {
    stations: Vec<Station>,
    submissions: Vec<SubmissionSummary>,
    next_id: i64,
}

/// A [`FoodStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// A store whose reference table holds `stations`.
    pub fn with_stations(stations: Vec<Station>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                stations,
                submissions: Vec::new(),
                next_id: 1,
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline, every operation fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored submissions.
    pub fn submission_count(&self) -> usize {
        self.tables().submissions.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn online(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.tables())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(s: &SubmissionSummary, filters: &SearchFilters) -> bool {
    filters.name.as_ref().is_none_or(|n| contains_ci(&s.name, n))
        && filters.tags.iter().all(|t| contains_ci(&s.tags, t))
        && filters.price.is_none_or(|p| s.price_tag == p)
        && filters.author.as_ref().is_none_or(|a| {
            s.author
                .as_ref()
                .is_some_and(|stored| stored.to_lowercase() == a.to_lowercase())
        })
        && filters
            .location
            .as_ref()
            .is_none_or(|l| s.stations.iter().any(|st| st == l))
        && filters.recommendations.as_ref().is_none_or(|r| {
            s.recommendations
                .as_ref()
                .is_some_and(|text| contains_ci(text, r))
        })
}

impl FoodStore for MemoryStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        let mut stations = self.online()?.stations.clone();
        stations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stations)
    }

    async fn station_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.online()?.stations.iter().map(|s| s.name.clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<SubmissionId, StoreError> {
        let mut tables = self.online()?;

        // Resolve every link before writing anything.
        if let Some(unknown) = submission
            .stations
            .iter()
            .find(|name| !tables.stations.iter().any(|s| &s.name == *name))
        {
            return Err(StoreError::UnknownStation(unknown.clone()));
        }

        let id = SubmissionId(tables.next_id.max(1));
        tables.next_id = id.0 + 1;

        let mut stations = submission.stations.clone();
        stations.sort();

        tables.submissions.push(SubmissionSummary {
            id,
            name: submission.name.clone(),
            tags: submission.tags.clone(),
            price_tag: submission.price_tag,
            author: submission.author.clone(),
            recommendations: submission.recommendations.clone(),
            date_submitted: submission.date_submitted,
            stations,
        });
        Ok(id)
    }

    async fn submission(&self, id: SubmissionId) -> Result<Option<SubmissionSummary>, StoreError> {
        Ok(self.online()?.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn stored_tags(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.online()?.submissions.iter().map(|s| s.tags.clone()).collect())
    }

    async fn authors(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.online()?;
        let mut authors: Vec<String> = Vec::new();
        for author in tables.submissions.iter().filter_map(|s| s.author.as_ref()) {
            if !authors.contains(author) {
                authors.push(author.clone());
            }
        }
        Ok(authors)
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<SubmissionSummary>, StoreError> {
        let mut hits: Vec<SubmissionSummary> = self
            .online()?
            .submissions
            .iter()
            .filter(|s| matches(s, filters))
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            b.date_submitted
                .cmp(&a.date_submitted)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(hits)
    }
}
