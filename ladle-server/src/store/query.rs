//! Search statement builder.
//!
//! Each active filter contributes one predicate and at most one positional
//! parameter. User text only ever travels as a bound parameter.

use crate::domain::SearchFilters;

/// Columns and joins shared by every submission read.
pub(super) const SUMMARY_SELECT: &str = "\
SELECT s.id, s.name, s.tags, s.price_tag, s.author, s.recommendations, s.date_submitted, \
ARRAY_AGG(ms.name ORDER BY ms.name) AS stations \
FROM submissions s \
JOIN submission_stations ss ON s.id = ss.submission_id \
JOIN mrt_stations ms ON ss.station_id = ms.id";

/// One row per submission, newest first. Same-day submissions are ordered by id.
pub(super) const SUMMARY_GROUP_ORDER: &str = " GROUP BY s.id ORDER BY s.date_submitted DESC, s.id DESC";

/// A parameterized search statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    predicates: Vec<String>,
    params: Vec<String>,
}

impl SearchQuery {
    /// Build the statement for a set of filters.
    pub fn from_filters(filters: &SearchFilters) -> Self {
        let mut query = SearchQuery::default();

        if let Some(name) = &filters.name {
            query.push(like_pattern(name), |n| format!(r"s.name ILIKE ${n} ESCAPE '\'"));
        }

        for tag in &filters.tags {
            query.push(like_pattern(tag), |n| format!(r"s.tags ILIKE ${n} ESCAPE '\'"));
        }

        if let Some(price) = filters.price {
            query.push(price.as_str().to_string(), |n| format!("s.price_tag = ${n}"));
        }

        if let Some(author) = &filters.author {
            query.push(author.clone(), |n| format!("LOWER(s.author) = LOWER(${n})"));
        }

        if let Some(location) = &filters.location {
            query.push(location.clone(), |n| {
                format!(
                    "EXISTS (SELECT 1 FROM submission_stations ss2 \
                     JOIN mrt_stations ms2 ON ss2.station_id = ms2.id \
                     WHERE ss2.submission_id = s.id AND ms2.name = ${n})"
                )
            });
        }

        if let Some(text) = &filters.recommendations {
            query.push(like_pattern(text), |n| {
                format!(r"s.recommendations ILIKE ${n} ESCAPE '\'")
            });
        }

        query
    }

    /// Add a predicate that uses the next positional parameter.
    fn push(&mut self, param: String, predicate: impl FnOnce(usize) -> String) {
        self.params.push(param);
        self.predicates.push(predicate(self.params.len()));
    }

    /// The full SQL statement.
    pub fn sql(&self) -> String {
        let mut sql = String::from(SUMMARY_SELECT);
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        sql.push_str(SUMMARY_GROUP_ORDER);
        sql
    }

    /// Parameters to bind, in placeholder order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The individual predicates, in the order they are joined.
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }
}

/// Wrap user text as a literal `%text%` LIKE pattern.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceTag;

    #[test]
    fn no_filters_has_no_where_clause() {
        let query = SearchQuery::from_filters(&SearchFilters::default());
        let sql = query.sql();

        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("GROUP BY s.id ORDER BY s.date_submitted DESC, s.id DESC"));
        assert!(query.params().is_empty());
    }

    #[test]
    fn every_filter_binds_in_order() {
        let filters = SearchFilters {
            name: Some("noodle".into()),
            tags: vec!["chinese".into(), "vegetarian".into()],
            price: Some(PriceTag::Pricey),
            author: Some("Alice".into()),
            location: Some("Eunos".into()),
            recommendations: Some("laksa".into()),
        };
        let query = SearchQuery::from_filters(&filters);

        assert_eq!(
            query.params(),
            ["%noodle%", "%chinese%", "%vegetarian%", "$$$", "Alice", "Eunos", "%laksa%"]
        );
        assert_eq!(query.predicates().len(), 7);
        assert_eq!(query.predicates()[0], r"s.name ILIKE $1 ESCAPE '\'");
        assert_eq!(query.predicates()[1], r"s.tags ILIKE $2 ESCAPE '\'");
        assert_eq!(query.predicates()[2], r"s.tags ILIKE $3 ESCAPE '\'");
        assert_eq!(query.predicates()[3], "s.price_tag = $4");
        assert_eq!(query.predicates()[4], "LOWER(s.author) = LOWER($5)");
        assert!(query.predicates()[5].contains("ms2.name = $6"));
        assert_eq!(query.predicates()[6], r"s.recommendations ILIKE $7 ESCAPE '\'");
    }

    #[test]
    fn predicates_are_anded() {
        let filters = SearchFilters {
            tags: vec!["chinese".into(), "vegetarian".into()],
            ..SearchFilters::default()
        };
        let sql = SearchQuery::from_filters(&filters).sql();
        assert!(sql.contains(
            r"WHERE s.tags ILIKE $1 ESCAPE '\' AND s.tags ILIKE $2 ESCAPE '\' GROUP BY"
        ));
    }

    #[test]
    fn user_text_never_reaches_sql() {
        let filters = SearchFilters {
            name: Some("'; DROP TABLE submissions; --".into()),
            author: Some("o'brien".into()),
            ..SearchFilters::default()
        };
        let query = SearchQuery::from_filters(&filters);
        let sql = query.sql();

        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("brien"));
        assert_eq!(query.params()[1], "o'brien");
    }

    #[test]
    fn location_filter_keeps_all_stations_in_aggregate() {
        let filters = SearchFilters {
            location: Some("Eunos".into()),
            ..SearchFilters::default()
        };
        let sql = SearchQuery::from_filters(&filters).sql();

        // The join feeding ARRAY_AGG is left unfiltered.
        assert!(!sql.contains("ms.name = $"));
        assert!(sql.contains("EXISTS (SELECT 1 FROM submission_stations ss2"));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("50%"), r"%50\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\"), r"%c:\\%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
