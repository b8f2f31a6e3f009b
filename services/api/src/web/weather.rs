//! services/api/src/web/weather.rs
//!
//! The current-weather endpoint. A read-oriented informational surface:
//! when the upstream is unconfigured, errors, or times out, it silently
//! degrades to the time-of-day fallback payload.

use crate::fallbacks;
use crate::web::state::AppState;
use crate::web::{degrades_to_fallback, surface_error};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

/// The request payload for current conditions.
#[derive(Deserialize, ToSchema)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions returned to the frontend.
#[derive(Serialize, ToSchema)]
pub struct WeatherResponse {
    pub temperature: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub feels_like: i32,
    pub city: String,
}

impl From<WeatherSnapshot> for WeatherResponse {
    fn from(snapshot: WeatherSnapshot) -> Self {
        Self {
            temperature: snapshot.temperature,
            description: snapshot.description,
            icon: snapshot.icon,
            humidity: snapshot.humidity,
            feels_like: snapshot.feels_like,
            city: snapshot.city,
        }
    }
}

/// Get current weather for a location.
#[utoipa::path(
    post,
    path = "/api/weather/current",
    request_body = WeatherRequest,
    responses(
        (status = 200, description = "Current conditions (live or fallback)", body = WeatherResponse)
    )
)]
pub async fn current_weather_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<WeatherRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let snapshot = match &app_state.weather {
        Some(weather) => match weather.current(request.latitude, request.longitude).await {
            Ok(snapshot) => snapshot,
            Err(e) if degrades_to_fallback(&e) => {
                warn!("Weather upstream failed, serving fallback: {}", e);
                fallbacks::weather()
            }
            Err(e) => return Err(surface_error("weather", e)),
        },
        None => fallbacks::weather(),
    };

    Ok(Json(WeatherResponse::from(snapshot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;

    #[tokio::test]
    async fn missing_credential_serves_a_fallback_snapshot() {
        let state = Arc::new(unconfigured_state());
        let result = current_weather_handler(
            State(state),
            Json(WeatherRequest {
                latitude: 48.72,
                longitude: 21.25,
            }),
        )
        .await;

        let response = result.expect("fallback must satisfy the contract").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let snapshot: WeatherSnapshot = serde_json::from_slice(&body).unwrap();

        // Exactly one of the two fixed payloads, selected by local hour.
        let day = fallbacks::weather_for_hour(12);
        let night = fallbacks::weather_for_hour(22);
        assert!(snapshot == day || snapshot == night);
        assert!(snapshot.humidity <= 100);
    }
}
