//! Shortlink resolution and station auto-suggestion.

use reqwest::redirect::Policy;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::GeoConfig;
use crate::domain::{Coordinates, NearbyStation};
use crate::store::FoodStore;

use super::distance::rank_nearest;
use super::error::GeoError;
use super::extract::{extract_coordinates, extract_place_name};

/// Follows map shortlinks to their canonical URL.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    http: reqwest::Client,
}

impl LinkResolver {
    /// Create a resolver with the configured timeout and redirect limit.
    pub fn new(config: &GeoConfig) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { http })
    }

    /// Follow `link` through its redirects and return the final URL.
    ///
    /// Only http and https links are followed. Any failure (bad URL, other
    /// scheme, timeout, too many redirects) gives `None`; the caller carries
    /// on without map data.
    pub async fn resolve(&self, link: &str) -> Option<String> {
        match self.follow(link).await {
            Ok(url) => {
                debug!(link, %url, "resolved map link");
                Some(url)
            }
            Err(e) => {
                warn!(link, error = %e, "could not resolve map link");
                None
            }
        }
    }

    async fn follow(&self, link: &str) -> Result<String, GeoError> {
        let url = Url::parse(link.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GeoError::UnsupportedScheme(url.scheme().to_string()));
        }

        // Redirects are only followed to http(s) targets by reqwest itself.
        let response = self.http.get(url).send().await?;
        Ok(response.url().to_string())
    }
}

/// Everything a map link told us about a venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedPlace {
    /// The canonical URL the link redirected to.
    pub url: String,
    /// Venue name from the URL, empty if it had none.
    pub place_name: String,
    pub coordinates: Option<Coordinates>,
    /// Nearest stations within the radius, closest first.
    pub nearest_stations: Vec<NearbyStation>,
}

/// Auto-fill helper for the submit form.
///
/// Every operation degrades to "no data" instead of failing: a broken
/// link or an unreachable database never blocks manual entry.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    links: LinkResolver,
    radius_km: f64,
    station_limit: usize,
}

impl GeoResolver {
    pub fn new(config: &GeoConfig) -> Result<Self, GeoError> {
        Ok(Self {
            links: LinkResolver::new(config)?,
            radius_km: config.radius_km,
            station_limit: config.station_limit,
        })
    }

    /// The configured radius in kilometres.
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// The configured number of stations to suggest.
    pub fn station_limit(&self) -> usize {
        self.station_limit
    }

    /// Up to `limit` stations within `max_distance_km` of `origin`, closest first.
    ///
    /// A storage failure yields an empty list.
    pub async fn nearest_stations<S: FoodStore>(
        &self,
        store: &S,
        origin: Coordinates,
        limit: usize,
        max_distance_km: f64,
    ) -> Vec<NearbyStation> {
        match store.stations().await {
            Ok(stations) => rank_nearest(&stations, origin, limit, max_distance_km),
            Err(e) => {
                warn!(error = %e, "station lookup failed, skipping suggestions");
                Vec::new()
            }
        }
    }

    /// Resolve a shortlink and derive the venue name and nearby stations.
    ///
    /// Returns `None` if the link can't be followed. Station lookup is
    /// skipped when the resolved URL has no coordinates.
    pub async fn locate<S: FoodStore>(&self, store: &S, link: &str) -> Option<LocatedPlace> {
        let url = self.links.resolve(link).await?;
        let place_name = extract_place_name(&url);
        let coordinates = extract_coordinates(Some(&url));

        let nearest_stations = match coordinates {
            Some(origin) => {
                self.nearest_stations(store, origin, self.station_limit, self.radius_km)
                    .await
            }
            None => Vec::new(),
        };

        Some(LocatedPlace {
            url,
            place_name,
            coordinates,
            nearest_stations,
        })
    }
}
