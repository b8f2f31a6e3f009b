//! services/api/src/web/mod.rs
//!
//! The axum handler layer, one module per capability, plus the master
//! OpenAPI definition. Every handler is an error boundary: it returns
//! either a structurally complete response or an explicit error status,
//! never a partial payload.

use axum::http::StatusCode;
use axum::response::Json;
use seniorsync_core::ports::PortError;
use serde_json::{json, Value};
use utoipa::OpenApi;

pub mod activities;
pub mod chat;
pub mod emergency;
pub mod fact_check;
pub mod medications;
pub mod news;
pub mod scam;
pub mod speech;
pub mod state;
pub mod weather;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        chat::chat_handler,
        scam::analyze_handler,
        weather::current_weather_handler,
        activities::search_activities_handler,
        emergency::send_alert_handler,
    ),
    components(
        schemas(
            chat::ChatRequest,
            chat::ChatResponse,
            scam::ScamCheckRequest,
            scam::ScamCheckResponse,
            weather::WeatherRequest,
            weather::WeatherResponse,
            activities::ActivityRequest,
            activities::ActivitiesResponse,
            emergency::EmergencyRequest,
            emergency::EmergencyResponse,
        )
    ),
    tags(
        (name = "SeniorSync API", description = "Companion gateway endpoints for the elderly-care app.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Handler Plumbing
//=========================================================================================

/// Maps a port failure to an explicit error status for endpoints where no
/// fallback payload exists (or where substituting one would be harmful).
pub(crate) fn surface_error(capability: &str, e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        PortError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("The {} service is not configured", capability),
        ),
        PortError::Upstream(detail) => (
            StatusCode::BAD_GATEWAY,
            format!("{} upstream failed: {}", capability, detail),
        ),
        PortError::Timeout => (
            StatusCode::BAD_GATEWAY,
            format!("{} upstream timed out", capability),
        ),
        PortError::MalformedReply(detail) => (
            StatusCode::BAD_GATEWAY,
            format!("{} upstream returned an unparseable reply: {}", capability, detail),
        ),
        PortError::Unexpected(detail) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{} failed unexpectedly: {}", capability, detail),
        ),
    }
}

/// Whether a port failure may be silently replaced by a fallback payload.
/// A malformed structured reply never qualifies; it signals a bug that must
/// stay visible.
pub(crate) fn degrades_to_fallback(e: &PortError) -> bool {
    matches!(
        e,
        PortError::Unavailable(_) | PortError::Upstream(_) | PortError::Timeout
    )
}

//=========================================================================================
// Service Meta Handlers
//=========================================================================================

/// The service banner at `/`.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to SeniorSync API",
        "version": "1.0.0",
        "status": "running"
    }))
}

/// Liveness probe at `/health`.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::state::AppState;
    use crate::adapters::InMemoryMedicationStore;
    use crate::config::Config;
    use std::sync::Arc;

    /// An `AppState` with no upstream configured, matching a deployment
    /// where every credential is absent.
    pub fn unconfigured_state() -> AppState {
        // Field-by-field instead of Config::from_env so tests stay hermetic.
        let config = Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            log_level: tracing::Level::INFO,
            allowed_origins: vec![],
            openai_api_key: None,
            openweather_api_key: None,
            google_maps_api_key: None,
            news_api_key: None,
            twilio: None,
            chat_model: "gpt-4o-mini".to_string(),
            analysis_model: "gpt-4o-mini".to_string(),
            stt_model: "whisper-1".to_string(),
        };
        AppState {
            config: Arc::new(config),
            medications: Arc::new(InMemoryMedicationStore::new()),
            chat: None,
            scam: None,
            fact_check: None,
            weather: None,
            places: None,
            news: None,
            alerts: None,
            speech: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_replies_never_degrade_to_fallback() {
        assert!(!degrades_to_fallback(&PortError::MalformedReply("x".to_string())));
        assert!(!degrades_to_fallback(&PortError::Unexpected("x".to_string())));
        assert!(degrades_to_fallback(&PortError::Unavailable("x".to_string())));
        assert!(degrades_to_fallback(&PortError::Upstream("x".to_string())));
        assert!(degrades_to_fallback(&PortError::Timeout));
    }

    #[test]
    fn surface_error_maps_variants_to_statuses() {
        let (status, _) = surface_error("chat", PortError::Unavailable("k".to_string()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let (status, _) = surface_error("chat", PortError::MalformedReply("k".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, _) = surface_error("store", PortError::NotFound("Medication x".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
