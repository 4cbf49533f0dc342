//! OpenStreetMap Nominatim geocoder.
//!
//! Uses the public search endpoint with `format=json&limit=1`. Callers
//! are expected to respect Nominatim's usage policy (identifying
//! User-Agent, at most one request per second).

use super::{Geocoder, ResolverError};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Public Nominatim search endpoint
pub const DEFAULT_URL: &str = "https://nominatim.openstreetmap.org/search";

/// One entry of a Nominatim search response. Coordinates come back as
/// strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Blocking Nominatim client
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    url: String,
}

impl Nominatim {
    /// Builds a client for `url` sending `user_agent` with every request.
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ResolverError::Transport(e.to_string()))?;

        Ok(Nominatim {
            client,
            url: url.to_owned(),
        })
    }
}

/// Extracts the first result's coordinates from a search response body.
fn parse_search_response(query: &str, body: &str) -> Result<(f64, f64), ResolverError> {
    let results: Vec<SearchResult> =
        serde_json::from_str(body).map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| ResolverError::NotFound(query.to_owned()))?;

    let latitude = first
        .lat
        .parse::<f64>()
        .map_err(|e| ResolverError::InvalidResponse(format!("lat [{}]: {e}", first.lat)))?;
    let longitude = first
        .lon
        .parse::<f64>()
        .map_err(|e| ResolverError::InvalidResponse(format!("lon [{}]: {e}", first.lon)))?;

    Ok((latitude, longitude))
}

impl Geocoder for Nominatim {
    fn geocode(&self, query: &str) -> Result<(f64, f64), ResolverError> {
        resolver_debug!("(geocode) Nominatim search for [{}].", query);

        let body = self
            .client
            .get(&self.url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| ResolverError::Transport(e.to_string()))?;

        parse_search_response(query, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_result() {
        let body = r#"[
            {"place_id": 1, "lat": "41.8755616", "lon": "-87.6244212", "display_name": "Chicago"},
            {"place_id": 2, "lat": "0", "lon": "0"}
        ]"#;
        assert_eq!(
            parse_search_response("Chicago", body),
            Ok((41.8755616, -87.6244212))
        );
    }

    #[test]
    fn test_parse_empty_result() {
        assert_eq!(
            parse_search_response("Atlantis", "[]"),
            Err(ResolverError::NotFound("Atlantis".to_owned()))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_search_response("x", "<html>rate limited</html>"),
            Err(ResolverError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_search_response("x", r#"[{"lat": "north", "lon": "1"}]"#),
            Err(ResolverError::InvalidResponse(_))
        ));
    }
}
