//! Price tag type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a string that is not one of the price tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price tag: {0:?}")]
pub struct InvalidPriceTag(pub String);

/// How expensive a venue is, from `$` to `$$$$+`.
///
/// The set is closed; a `PriceTag` value is always one of the four tags
/// shown on the submit form.
///
/// # Examples
///
/// ```
/// use ladle_server::domain::PriceTag;
///
/// let tag: PriceTag = "$$".parse().unwrap();
/// assert_eq!(tag, PriceTag::Moderate);
/// assert_eq!(tag.as_str(), "$$");
///
/// assert!("$$$$".parse::<PriceTag>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTag {
    #[serde(rename = "$")]
    Cheap,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Pricey,
    #[serde(rename = "$$$$+")]
    Splurge,
}

impl PriceTag {
    /// All tags, cheapest first. This is the order the forms list them in.
    pub const ALL: [PriceTag; 4] = [
        PriceTag::Cheap,
        PriceTag::Moderate,
        PriceTag::Pricey,
        PriceTag::Splurge,
    ];

    /// The stored/displayed form of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTag::Cheap => "$",
            PriceTag::Moderate => "$$",
            PriceTag::Pricey => "$$$",
            PriceTag::Splurge => "$$$$+",
        }
    }
}

impl FromStr for PriceTag {
    type Err = InvalidPriceTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| InvalidPriceTag(s.to_string()))
    }
}

impl fmt::Display for PriceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
