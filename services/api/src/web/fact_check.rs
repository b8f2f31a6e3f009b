//! services/api/src/web/fact_check.rs
//!
//! The fact-checking endpoint. Same error policy as scam analysis: no canned
//! verdict is ever substituted, failures surface explicitly.

use crate::web::state::AppState;
use crate::web::surface_error;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

fn default_language() -> String {
    "en-US".to_string()
}

/// The request payload for a fact check.
#[derive(Deserialize)]
pub struct FactCheckRequest {
    pub claim: String,
    pub context: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

/// Verify a claim or news story.
pub async fn check_claim_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<FactCheckRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if request.claim.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "claim must not be empty".to_string(),
        ));
    }

    let fact_check = app_state.fact_check.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "The fact-check service is not configured".to_string(),
        )
    })?;

    match fact_check
        .check(&request.claim, request.context.as_deref(), &request.language)
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Fact check failed: {}", e);
            Err(surface_error("fact check", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;

    #[tokio::test]
    async fn blank_claim_is_rejected_before_any_upstream_call() {
        let state = Arc::new(unconfigured_state());
        let result = check_claim_handler(
            State(state),
            Json(FactCheckRequest {
                claim: "".to_string(),
                context: None,
                language: default_language(),
            }),
        )
        .await;

        let err = result.err().expect("blank claim should be rejected");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_credential_surfaces_as_service_unavailable() {
        let state = Arc::new(unconfigured_state());
        let result = check_claim_handler(
            State(state),
            Json(FactCheckRequest {
                claim: "The moon is made of cheese".to_string(),
                context: None,
                language: default_language(),
            }),
        )
        .await;

        let err = result.err().expect("unconfigured fact check should error");
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
