//! Geo resolver error types.

/// Failures while following a map link.
///
/// These never escape the resolver's public operations, which turn them
/// into "no data". They exist so the failure can be logged with its cause.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// Request failed: bad URL, timeout, connection error or redirect limit
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The link isn't a URL at all
    #[error("invalid link: {0}")]
    InvalidLink(#[from] url::ParseError),

    /// Only http and https links are followed
    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),
}
