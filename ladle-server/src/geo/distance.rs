//! Great-circle distances and nearest-station ranking.

use crate::domain::{Coordinates, NearbyStation, Station};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// The `limit` stations closest to `origin`, no farther than `max_distance_km`.
///
/// Stations without coordinates are skipped. The result is sorted by
/// ascending distance; equal distances keep their input order.
pub fn rank_nearest(
    stations: &[Station],
    origin: Coordinates,
    limit: usize,
    max_distance_km: f64,
) -> Vec<NearbyStation> {
    let mut ranked: Vec<(f64, &Station)> = stations
        .iter()
        .filter_map(|s| Some((haversine_km(origin, s.coordinates()?), s)))
        .filter(|(distance, _)| *distance <= max_distance_km)
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(distance, s)| NearbyStation {
            name: s.name.clone(),
            distance_km: round_2dp(distance),
        })
        .collect()
}

fn round_2dp(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<Station> {
        vec![
            Station::new("Changi Airport", Some(1.3574), Some(103.9884)),
            Station::new("Eunos", Some(1.3150), Some(103.9030)),
            Station::new("Paya Lebar", Some(1.3177), Some(103.8926)),
            Station::new("Kembangan", Some(1.3210), Some(103.9129)),
            Station::new("Mystery Halt", None, None),
        ]
    }

    fn joo_chiat() -> Coordinates {
        Coordinates::new(1.31, 103.90)
    }

    #[test]
    fn zero_distance() {
        let p = Coordinates::new(1.3, 103.8);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Coordinates::new(1.3574, 103.9884);
        let b = Coordinates::new(1.2840, 103.8510);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn nearest_two_within_radius() {
        let nearest = rank_nearest(&stations(), joo_chiat(), 2, 1.5);

        let names: Vec<_> = nearest.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Eunos", "Paya Lebar"]);
        assert!(nearest[0].distance_km <= nearest[1].distance_km);
        assert!(nearest.iter().all(|s| s.distance_km <= 1.5));
    }

    #[test]
    fn radius_excludes_far_stations() {
        let nearest = rank_nearest(&stations(), joo_chiat(), 2, 1.0);
        let names: Vec<_> = nearest.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Eunos"]);
    }

    #[test]
    fn nothing_in_radius_is_empty() {
        let far_away = Coordinates::new(1.45, 103.60);
        assert!(rank_nearest(&stations(), far_away, 2, 1.0).is_empty());
    }

    #[test]
    fn limit_truncates() {
        let nearest = rank_nearest(&stations(), joo_chiat(), 1, 100.0);
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].name, "Eunos");

        let all = rank_nearest(&stations(), joo_chiat(), 10, 100.0);
        assert_eq!(all.len(), 4, "station without coordinates is skipped");
    }

    #[test]
    fn distances_are_rounded() {
        let nearest = rank_nearest(&stations(), joo_chiat(), 1, 5.0);
        let d = nearest[0].distance_km;
        assert_eq!((d * 100.0).round() / 100.0, d);
    }
}
