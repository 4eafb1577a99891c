//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidPriceTag, NearbyStation, PriceTag, SubmissionForm, SubmissionSummary};
use crate::geo::LocatedPlace;

/// Largest number of stations the nearest-station endpoint will return.
pub const MAX_NEAREST_LIMIT: usize = 10;

/// Response for a JSON search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Number of matching submissions
    pub count: usize,

    /// Matching submissions, newest first
    pub submissions: Vec<SubmissionSummary>,
}

/// Query string of the submit form page.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitPageRequest {
    /// Map link to pre-fill the form from
    pub map_link: Option<String>,
}

/// Request to resolve a map link.
#[derive(Debug, Deserialize)]
pub struct LocateRequest {
    /// Shortened or full map URL
    pub link: String,
}

/// Response for map link resolution.
#[derive(Debug, Serialize)]
pub struct LocateResponse {
    /// `None` if the link could not be followed
    pub place: Option<LocatedPlace>,
}

/// Request for the stations nearest a point.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub lon: f64,

    /// Maximum number of stations (defaults to the configured limit)
    pub limit: Option<usize>,

    /// Search radius in km (defaults to the configured radius)
    pub radius_km: Option<f64>,
}

/// Response for the nearest-station lookup.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub stations: Vec<NearbyStation>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decoded fields of the submit form.
///
/// Text fields keep the user's input so the form can be re-rendered as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitFormInput {
    pub name: String,
    pub tags: String,
    pub price_tag: String,
    pub author: String,
    pub stations: Vec<String>,
    pub recommendations: String,
    pub map_link: String,
}

impl SubmitFormInput {
    /// Collect fields from decoded `application/x-www-form-urlencoded` pairs.
    ///
    /// `stations` may repeat; every other field keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut input = SubmitFormInput::default();
        for (key, value) in pairs {
            let value = value.as_ref().to_string();
            match key.as_ref() {
                "name" => input.name = value,
                "tags" => input.tags = value,
                "price_tag" => input.price_tag = value,
                "author" => input.author = value,
                "stations" => input.stations.push(value),
                "recommendations" => input.recommendations = value,
                "map_link" => input.map_link = value,
                _ => {}
            }
        }
        input
    }

    /// Convert into a domain form. Fails only on an unknown price tag.
    pub fn to_form(&self) -> Result<SubmissionForm, String> {
        let price_tag: PriceTag = self
            .price_tag
            .parse()
            .map_err(|e: InvalidPriceTag| e.to_string())?;
        Ok(SubmissionForm {
            name: self.name.clone(),
            tags: self.tags.clone(),
            price_tag,
            author: self.author.clone(),
            stations: self.stations.clone(),
            recommendations: self.recommendations.clone(),
        })
    }
}
