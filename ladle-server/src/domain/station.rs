//! MRT station reference data.

use serde::Serialize;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A row of the `mrt_stations` reference table.
///
/// Stations are never created by this service. Some rows have no
/// coordinates; those are still selectable on the forms but are skipped by
/// the nearest-station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Station {
    pub fn new(name: impl Into<String>, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// The station's location, if both coordinates are known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

/// A station near some point, with its distance in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStation {
    pub name: String,
    pub distance_km: f64,
}
