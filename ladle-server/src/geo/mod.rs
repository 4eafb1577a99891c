//! Map-link geocoding for the submit form.
//!
//! A shortened map link is followed to its canonical URL, which encodes the
//! venue name (`/place/<name>/`) and its coordinates (`@lat,lon`). The
//! coordinates are then used to suggest the nearest MRT stations.
//!
//! All of this is optional enrichment. Failures are logged and surface as
//! absent values, never as errors.

mod distance;
mod error;
mod extract;
mod resolver;

pub use distance::{EARTH_RADIUS_KM, haversine_km, rank_nearest};
pub use error::GeoError;
pub use extract::{extract_coordinates, extract_place_name};
pub use resolver::{GeoResolver, LinkResolver, LocatedPlace};
