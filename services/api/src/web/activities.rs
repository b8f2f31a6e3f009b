//! services/api/src/web/activities.rs
//!
//! The nearby-activities endpoint. Degrades silently to the fixed mock list
//! when the places upstream is unconfigured or fails.

use crate::fallbacks;
use crate::web::state::AppState;
use crate::web::{degrades_to_fallback, surface_error};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::{Activity, GeoPoint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

/// Keyword used when the caller supplies no interests.
const DEFAULT_KEYWORD: &str = "senior center community events";

fn default_radius() -> u32 {
    5000
}

/// The request payload for an activity search.
#[derive(Deserialize, ToSchema)]
pub struct ActivityRequest {
    #[schema(value_type = Object)]
    pub location: GeoPoint,
    /// Search radius in meters.
    #[serde(default = "default_radius")]
    pub radius: u32,
    pub interests: Option<Vec<String>>,
    /// Accepted from the frontend but not forwarded: the nearby-search
    /// upstream exposes no accessibility data to filter on.
    #[serde(default)]
    pub wheelchair_accessible: bool,
}

/// The ranked activity list returned to the frontend.
#[derive(Serialize, ToSchema)]
pub struct ActivitiesResponse {
    #[schema(value_type = Vec<Object>)]
    pub activities: Vec<Activity>,
    pub count: usize,
}

/// Search for local activities near a location.
#[utoipa::path(
    post,
    path = "/api/activities/search",
    request_body = ActivityRequest,
    responses(
        (status = 200, description = "Nearby activities (live or mock)", body = ActivitiesResponse)
    )
)]
pub async fn search_activities_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ActivityRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let keyword = match &request.interests {
        Some(interests) if !interests.is_empty() => interests.join(" "),
        _ => DEFAULT_KEYWORD.to_string(),
    };

    let activities = match &app_state.places {
        Some(places) => match places.search(request.location, request.radius, &keyword).await {
            Ok(activities) => activities,
            Err(e) if degrades_to_fallback(&e) => {
                warn!("Places upstream failed, serving mock activities: {}", e);
                fallbacks::activities()
            }
            Err(e) => return Err(surface_error("places", e)),
        },
        None => fallbacks::activities(),
    };

    let count = activities.len();
    Ok(Json(ActivitiesResponse { activities, count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;

    fn request(interests: Option<Vec<String>>) -> ActivityRequest {
        ActivityRequest {
            location: GeoPoint {
                latitude: 48.72,
                longitude: 21.25,
            },
            radius: default_radius(),
            interests,
            wheelchair_accessible: false,
        }
    }

    #[tokio::test]
    async fn missing_credential_serves_the_five_item_mock_list() {
        let state = Arc::new(unconfigured_state());
        let result = search_activities_handler(State(state), Json(request(None))).await;

        let response = result.expect("mock list must satisfy the contract").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["count"], 5);
        for activity in parsed["activities"].as_array().unwrap() {
            assert!(activity["distance"].as_f64().unwrap() >= 0.0);
            assert_eq!(activity["wheelchair_accessible"], true);
        }
    }

    #[test]
    fn interests_build_the_search_keyword() {
        let with = request(Some(vec!["gardening".to_string(), "chess".to_string()]));
        let keyword = match &with.interests {
            Some(interests) if !interests.is_empty() => interests.join(" "),
            _ => DEFAULT_KEYWORD.to_string(),
        };
        assert_eq!(keyword, "gardening chess");

        let without = request(Some(vec![]));
        let keyword = match &without.interests {
            Some(interests) if !interests.is_empty() => interests.join(" "),
            _ => DEFAULT_KEYWORD.to_string(),
        };
        assert_eq!(keyword, DEFAULT_KEYWORD);
    }
}
