//! Parsing of resolved map URLs.
//!
//! Neither function touches the network. Anything that doesn't look like a
//! map URL simply yields no data.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::Coordinates;

/// `@<lat>,<lon>` as it appears in a map URL path, e.g. `@1.3100,103.9000,17z`.
static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([-+]?\d+(?:\.\d+)?),([-+]?\d+(?:\.\d+)?)").expect("coordinate pattern is valid")
});

/// Extract the latitude/longitude pair from a map URL.
///
/// Returns `None` when the URL is absent or has no `@lat,lon` marker.
pub fn extract_coordinates(url: Option<&str>) -> Option<Coordinates> {
    let caps = COORDINATES.captures(url?)?;
    let latitude = caps[1].parse().ok()?;
    let longitude = caps[2].parse().ok()?;
    Some(Coordinates::new(latitude, longitude))
}

/// Extract the venue name from the `/place/<name>/` segment of a map URL.
///
/// `+` becomes a space and percent-escapes are decoded. Returns an empty
/// string if there is no such segment or the URL can't be parsed.
pub fn extract_place_name(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some((_, rest)) = parsed.path().split_once("/place/") else {
        return String::new();
    };
    let segment = rest.split('/').next().unwrap_or_default().replace('+', " ");

    match urlencoding::decode(&segment) {
        Ok(name) => name.trim().to_string(),
        Err(e) => {
            tracing::debug!(url, error = %e, "place name is not valid UTF-8");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOO_CHIAT: &str = "https://www.google.com/maps/place/Joo+Chiat+Food+Centre/@1.3100,103.9000,17z/data=!3m1";

    #[test]
    fn place_name_from_maps_url() {
        assert_eq!(extract_place_name(JOO_CHIAT), "Joo Chiat Food Centre");
    }

    #[test]
    fn coordinates_from_maps_url() {
        let coords = extract_coordinates(Some(JOO_CHIAT)).unwrap();
        assert_eq!(coords, Coordinates::new(1.31, 103.90));
    }

    #[test]
    fn signed_coordinates() {
        let coords = extract_coordinates(Some("https://maps.example/@-33.8688,+151.2093,12z")).unwrap();
        assert_eq!(coords, Coordinates::new(-33.8688, 151.2093));
    }

    #[test]
    fn integer_coordinates() {
        let coords = extract_coordinates(Some("https://maps.example/@1,104,12z")).unwrap();
        assert_eq!(coords, Coordinates::new(1.0, 104.0));
    }

    #[test]
    fn missing_coordinates() {
        assert_eq!(extract_coordinates(None), None);
        assert_eq!(extract_coordinates(Some("https://maps.example/place/Somewhere/")), None);
        assert_eq!(extract_coordinates(Some("")), None);
    }

    #[test]
    fn percent_encoded_place_name() {
        let url = "https://www.google.com/maps/place/Caf%C3%A9+Mocha%26Co/@1.3,103.8,17z";
        assert_eq!(extract_place_name(url), "Café Mocha&Co");
    }

    #[test]
    fn place_name_without_trailing_segment() {
        let url = "https://www.google.com/maps/place/Tiong+Bahru+Market";
        assert_eq!(extract_place_name(url), "Tiong Bahru Market");
    }

    #[test]
    fn no_place_segment() {
        assert_eq!(extract_place_name("https://www.google.com/maps/@1.3,103.8,17z"), "");
    }

    #[test]
    fn unparseable_url() {
        assert_eq!(extract_place_name("not a url"), "");
        assert_eq!(extract_place_name(""), "");
    }

    #[test]
    fn invalid_utf8_escape() {
        let url = "https://www.google.com/maps/place/Bad%FF/@1.3,103.8,17z";
        assert_eq!(extract_place_name(url), "");
    }
}
