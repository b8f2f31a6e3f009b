//! services/api/src/adapters/places.rs
//!
//! This module contains the adapter for the Google Places nearby-search API.
//! It implements the `PlacesService` port from the `core` crate.

use async_trait::async_trait;
use seniorsync_core::{
    domain::{Activity, GeoPoint},
    ports::{PlacesService, PortError, PortResult},
};
use serde::Deserialize;

const PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// The upstream ranks results; we never return more than this many.
const MAX_RESULTS: usize = 10;

//=========================================================================================
// Upstream Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct PlacesReply {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    types: Vec<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `PlacesService` port against Google Places.
#[derive(Clone)]
pub struct GooglePlacesAdapter {
    http: reqwest::Client,
    api_key: String,
}

impl GooglePlacesAdapter {
    /// Creates a new `GooglePlacesAdapter`.
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    fn map_transport_error(e: reqwest::Error) -> PortError {
        if e.is_timeout() {
            PortError::Timeout
        } else {
            PortError::Upstream(e.to_string())
        }
    }
}

//=========================================================================================
// `PlacesService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlacesService for GooglePlacesAdapter {
    /// Searches for points of interest near a location. The upstream exposes
    /// no accessibility or distance data on this endpoint, so those fields
    /// carry their neutral values.
    async fn search(
        &self,
        location: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> PortResult<Vec<Activity>> {
        let response = self
            .http
            .get(PLACES_URL)
            .query(&[
                (
                    "location",
                    format!("{},{}", location.latitude, location.longitude),
                ),
                ("radius", radius_m.to_string()),
                ("keyword", keyword.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "Google Places returned status {}",
                response.status()
            )));
        }

        let reply: PlacesReply = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if reply.status != "OK" {
            return Err(PortError::Upstream(format!(
                "Google Places returned status field '{}'",
                reply.status
            )));
        }

        let activities = reply
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .map(|place| Activity {
                name: place.name,
                address: place.vicinity.unwrap_or_default(),
                distance: 0.0,
                rating: place.rating,
                types: place.types,
                wheelchair_accessible: false,
                phone: None,
            })
            .collect();

        Ok(activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parses_and_is_capped_at_ten() {
        let results: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"name":"Place {}","vicinity":"Addr {}","types":["park"]}}"#, i, i))
            .collect();
        let json = format!(r#"{{"status":"OK","results":[{}]}}"#, results.join(","));
        let reply: PlacesReply = serde_json::from_str(&json).unwrap();
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results.len(), 12);
        assert_eq!(reply.results.into_iter().take(MAX_RESULTS).count(), 10);
    }

    #[test]
    fn non_ok_status_field_is_an_upstream_error_shape() {
        let reply: PlacesReply =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS"}"#).unwrap();
        assert_eq!(reply.status, "ZERO_RESULTS");
        assert!(reply.results.is_empty());
    }
}
