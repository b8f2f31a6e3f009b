//! services/api/src/web/scam.rs
//!
//! Scam analysis endpoints. A wrong-but-plausible verdict would put users at
//! real risk, so this endpoint never substitutes a canned assessment: every
//! upstream failure surfaces explicitly. The demo examples endpoint is pure
//! static data.

use crate::fallbacks;
use crate::web::state::AppState;
use crate::web::surface_error;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::{RiskLevel, ScamAssessment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

fn default_language() -> String {
    "en-US".to_string()
}

/// The request payload for a scam analysis.
#[derive(Deserialize, ToSchema)]
pub struct ScamCheckRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

/// The analysis verdict returned to the frontend.
#[derive(Serialize, ToSchema)]
pub struct ScamCheckResponse {
    #[schema(value_type = String)]
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub indicators: Vec<String>,
}

impl From<ScamAssessment> for ScamCheckResponse {
    fn from(assessment: ScamAssessment) -> Self {
        Self {
            risk_level: assessment.risk_level,
            explanation: assessment.explanation,
            indicators: assessment.indicators,
        }
    }
}

/// Analyze a message for scam indicators.
#[utoipa::path(
    post,
    path = "/api/scam/analyze",
    request_body = ScamCheckRequest,
    responses(
        (status = 200, description = "Assessment produced", body = ScamCheckResponse),
        (status = 400, description = "Empty message"),
        (status = 502, description = "Upstream analysis failed or replied outside the schema"),
        (status = 503, description = "Analysis capability not configured")
    )
)]
pub async fn analyze_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ScamCheckRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if request.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "message must not be empty".to_string(),
        ));
    }

    let scam = app_state.scam.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "The scam analysis service is not configured".to_string(),
        )
    })?;

    match scam.analyze(&request.message, &request.language).await {
        Ok(assessment) => Ok(Json(ScamCheckResponse::from(assessment))),
        Err(e) => {
            error!("Scam analysis failed: {}", e);
            Err(surface_error("scam analysis", e))
        }
    }
}

/// Pre-loaded scam examples for the demo screen. Static data, no upstream
/// call; responses are byte-identical across requests.
pub async fn examples_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "examples": fallbacks::scam_examples() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_upstream_call() {
        let state = Arc::new(unconfigured_state());
        let result = analyze_handler(
            State(state),
            Json(ScamCheckRequest {
                message: "   ".to_string(),
                language: default_language(),
            }),
        )
        .await;

        let err = result.err().expect("blank message should be rejected");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_credential_never_substitutes_a_canned_verdict() {
        let state = Arc::new(unconfigured_state());
        let result = analyze_handler(
            State(state),
            Json(ScamCheckRequest {
                message: "You won a prize, send a fee".to_string(),
                language: default_language(),
            }),
        )
        .await;

        let err = result.err().expect("unconfigured analysis should error");
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn examples_are_byte_identical_across_calls() {
        let first = axum::body::to_bytes(
            examples_handler().await.into_response().into_body(),
            usize::MAX,
        )
        .await
        .unwrap();
        let second = axum::body::to_bytes(
            examples_handler().await.into_response().into_body(),
            usize::MAX,
        )
        .await
        .unwrap();
        assert_eq!(first, second);

        let parsed: serde_json::Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(parsed["examples"].as_array().unwrap().len(), 5);
    }
}
