//! Search and filter vocabularies.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{SearchFilters, SubmissionSummary, split_tags};
use crate::store::{FoodStore, StoreError};

/// Values offered by the search view's select boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Every distinct tag, sorted.
    pub tags: Vec<String>,
    /// Distinct authors, in the order they first submitted.
    pub authors: Vec<String>,
    /// Station names from the reference table, sorted.
    pub stations: Vec<String>,
}

/// Collect the filter vocabularies.
pub async fn filter_options<S: FoodStore>(store: &S) -> Result<FilterOptions, StoreError> {
    let stored_tags = store.stored_tags().await?;
    let authors = store.authors().await?;
    let stations = store.station_names().await?;

    Ok(FilterOptions {
        tags: tag_vocabulary(&stored_tags),
        authors,
        stations,
    })
}

/// Distinct tags across all stored tag strings, sorted ascending.
///
/// Tags are kept as stored, which is already lowercase.
pub fn tag_vocabulary(stored: &[String]) -> Vec<String> {
    stored
        .iter()
        .flat_map(|tags| split_tags(tags))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Submissions matching every active filter, newest first.
pub async fn search<S: FoodStore>(
    store: &S,
    filters: &SearchFilters,
) -> Result<Vec<SubmissionSummary>, StoreError> {
    store.search(filters).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceTag, Station, SubmissionForm};
    use crate::service::submission::submit_on;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn store() -> MemoryStore {
        MemoryStore::with_stations(vec![
            Station::new("Eunos", None, None),
            Station::new("Paya Lebar", None, None),
            Station::new("Bedok", None, None),
        ])
    }

    async fn add(
        store: &MemoryStore,
        name: &str,
        tags: &str,
        price_tag: PriceTag,
        author: &str,
        stations: &[&str],
        recommendations: &str,
        day: u32,
    ) {
        let form = SubmissionForm {
            name: name.into(),
            tags: tags.into(),
            price_tag,
            author: author.into(),
            stations: stations.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations.into(),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        submit_on(store, &form, date).await.unwrap();
    }

    async fn seeded() -> MemoryStore {
        let store = store();
        add(&store, "Lucky Noodles", "Chinese, Noodles", PriceTag::Cheap, "Bob", &["Eunos"], "Wanton mee", 1).await;
        add(&store, "Green Bowl", "chinese,vegetarian", PriceTag::Moderate, "alice", &["Paya Lebar", "Eunos"], "Mock char siu", 3).await;
        add(&store, "Leaf & Co", "Vegetarian, Western", PriceTag::Pricey, "", &["Bedok"], "", 2).await;
        add(&store, "Temple Veg", "Vegetarian,Chinese,Buffet", PriceTag::Cheap, "ALICE", &["Bedok"], "Bee hoon", 3).await;
        store
    }

    fn names(results: &[SubmissionSummary]) -> Vec<&str> {
        results.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn no_filters_returns_everything_newest_first() {
        let store = seeded().await;
        let results = search(&store, &SearchFilters::default()).await.unwrap();
        assert_eq!(
            names(&results),
            vec!["Temple Veg", "Green Bowl", "Leaf & Co", "Lucky Noodles"]
        );
    }

    #[tokio::test]
    async fn multiple_tags_are_anded() {
        let store = seeded().await;
        let filters = SearchFilters {
            tags: vec!["chinese".into(), "vegetarian".into()],
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Temple Veg", "Green Bowl"]);
    }

    #[tokio::test]
    async fn tag_filter_is_a_substring_test() {
        let store = seeded().await;
        let filters = SearchFilters {
            tags: vec!["VEG".into()],
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Temple Veg", "Green Bowl", "Leaf & Co"]);
    }

    #[tokio::test]
    async fn name_is_case_insensitive_substring() {
        let store = seeded().await;
        let filters = SearchFilters {
            name: Some("NOODLE".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Lucky Noodles"]);
    }

    #[tokio::test]
    async fn name_is_matched_literally() {
        let store = seeded().await;
        let filters = SearchFilters {
            name: Some("&".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Leaf & Co"]);
    }

    #[tokio::test]
    async fn price_is_exact() {
        let store = seeded().await;
        let filters = SearchFilters {
            price: Some(PriceTag::Cheap),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Temple Veg", "Lucky Noodles"]);
    }

    #[tokio::test]
    async fn author_is_case_insensitive_exact() {
        let store = seeded().await;
        let filters = SearchFilters {
            author: Some("Alice".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Temple Veg", "Green Bowl"]);

        let partial = SearchFilters {
            author: Some("ali".into()),
            ..SearchFilters::default()
        };
        assert!(search(&store, &partial).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn location_matches_any_station_and_keeps_all() {
        let store = seeded().await;
        let filters = SearchFilters {
            location: Some("Eunos".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Green Bowl", "Lucky Noodles"]);
        assert_eq!(results[0].stations, vec!["Eunos", "Paya Lebar"]);
    }

    #[tokio::test]
    async fn recommendations_substring() {
        let store = seeded().await;
        let filters = SearchFilters {
            recommendations: Some("char SIU".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Green Bowl"]);
    }

    #[tokio::test]
    async fn filters_combine() {
        let store = seeded().await;
        let filters = SearchFilters {
            tags: vec!["chinese".into()],
            price: Some(PriceTag::Cheap),
            location: Some("Bedok".into()),
            ..SearchFilters::default()
        };
        let results = search(&store, &filters).await.unwrap();
        assert_eq!(names(&results), vec!["Temple Veg"]);
    }

    #[tokio::test]
    async fn filter_options_vocabularies() {
        let store = seeded().await;
        let options = filter_options(&store).await.unwrap();

        assert_eq!(
            options.tags,
            vec!["buffet", "chinese", "noodles", "vegetarian", "western"]
        );
        assert_eq!(options.authors, vec!["bob", "alice"]);
        assert_eq!(options.stations, vec!["Bedok", "Eunos", "Paya Lebar"]);
    }

    #[tokio::test]
    async fn filter_options_surface_storage_failure() {
        let store = seeded().await;
        store.set_offline(true);
        assert!(filter_options(&store).await.is_err());
    }

    #[test]
    fn tag_vocabulary_dedups_and_sorts() {
        let stored = vec![
            "thai, spicy".to_string(),
            "".to_string(),
            "spicy,,thai".to_string(),
            "dessert".to_string(),
        ];
        assert_eq!(tag_vocabulary(&stored), vec!["dessert", "spicy", "thai"]);
    }
}
