//! Search filters.

use super::PriceTag;

/// Select-box value meaning "don't filter on this field".
pub const ANY: &str = "(Any)";

/// Optional, conjunctive filters for the search view.
///
/// Every field that is `None` (or an empty `tags` list) is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Case-insensitive substring of the venue name.
    pub name: Option<String>,
    /// Each tag must appear as a case-insensitive substring of the stored tags.
    pub tags: Vec<String>,
    pub price: Option<PriceTag>,
    /// Case-insensitive exact author match.
    pub author: Option<String>,
    /// Exact station name; matches if any of the submission's stations has it.
    pub location: Option<String>,
    /// Case-insensitive substring of the recommendation text.
    pub recommendations: Option<String>,
}

impl SearchFilters {
    /// Build filters from decoded query-string pairs.
    ///
    /// Blank values and the `(Any)` sentinel are treated as absent. `tags`
    /// may repeat. A price that isn't one of the tags is ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = SearchFilters::default();
        for (key, value) in pairs {
            let Some(value) = selected(value.as_ref()) else {
                continue;
            };
            match key.as_ref() {
                "name" => filters.name = Some(value),
                "tags" => {
                    if !filters.tags.contains(&value) {
                        filters.tags.push(value);
                    }
                }
                "price" => filters.price = value.parse().ok(),
                "author" => filters.author = Some(value),
                "location" => filters.location = Some(value),
                "recommendations" => filters.recommendations = Some(value),
                _ => {}
            }
        }
        filters
    }

    /// Whether no filter is active.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == SearchFilters::default()
    }
}

fn selected(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != ANY).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pairs_give_empty_filters() {
        let filters = SearchFilters::from_pairs(Vec::<(String, String)>::new());
        assert!(filters.is_empty());
    }

    #[test]
    fn any_sentinel_and_blanks_are_skipped() {
        let filters = SearchFilters::from_pairs([
            ("name", "  "),
            ("price", ANY),
            ("author", ANY),
            ("location", ANY),
            ("recommendations", ""),
        ]);
        assert!(filters.is_empty());
    }

    #[test]
    fn all_fields_parsed() {
        let filters = SearchFilters::from_pairs([
            ("name", "pasta"),
            ("tags", "chinese"),
            ("tags", "vegetarian"),
            ("price", "$$"),
            ("author", "alice"),
            ("location", "Eunos"),
            ("recommendations", "laksa"),
            ("unknown", "ignored"),
        ]);

        assert_eq!(filters.name.as_deref(), Some("pasta"));
        assert_eq!(filters.tags, vec!["chinese", "vegetarian"]);
        assert_eq!(filters.price, Some(PriceTag::Moderate));
        assert_eq!(filters.author.as_deref(), Some("alice"));
        assert_eq!(filters.location.as_deref(), Some("Eunos"));
        assert_eq!(filters.recommendations.as_deref(), Some("laksa"));
    }

    #[test]
    fn repeated_tags_are_collapsed() {
        let filters = SearchFilters::from_pairs([("tags", "thai"), ("tags", "thai")]);
        assert_eq!(filters.tags, vec!["thai"]);
    }

    #[test]
    fn bad_price_is_ignored() {
        let filters = SearchFilters::from_pairs([("price", "$$$$")]);
        assert_eq!(filters.price, None);
    }
}
