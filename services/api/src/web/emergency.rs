//! services/api/src/web/emergency.rs
//!
//! The emergency-alert endpoint.
//!
//! Policy: when the SMS provider is configured, success requires at least one
//! contact to actually receive the message; zero deliveries is a hard error,
//! not a polite lie. Only the unconfigured demo mode reports unconditional
//! success, and says so in its message.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::EmergencyContact;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

/// The request payload for an emergency alert.
#[derive(Deserialize, ToSchema)]
pub struct EmergencyRequest {
    pub user_name: String,
    #[schema(value_type = Vec<Object>)]
    pub contacts: Vec<EmergencyContact>,
    pub location: Option<String>,
}

/// The alert outcome returned to the frontend.
#[derive(Serialize, ToSchema)]
pub struct EmergencyResponse {
    pub success: bool,
    pub message: String,
    pub alerts_sent: usize,
}

/// Send an emergency alert to family contacts.
#[utoipa::path(
    post,
    path = "/api/emergency/alert",
    request_body = EmergencyRequest,
    responses(
        (status = 200, description = "Alert delivered (or demo-mode acknowledgment)", body = EmergencyResponse),
        (status = 400, description = "Empty contact list"),
        (status = 502, description = "No contact could be reached")
    )
)]
pub async fn send_alert_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<EmergencyRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if request.contacts.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "contacts must contain at least one entry".to_string(),
        ));
    }

    let numbers: Vec<String> = request
        .contacts
        .iter()
        .map(|contact| contact.phone.clone())
        .collect();

    match &app_state.alerts {
        Some(alerts) => {
            match alerts
                .send_alert(&numbers, &request.user_name, request.location.as_deref())
                .await
            {
                Ok(delivered) if delivered > 0 => Ok(Json(EmergencyResponse {
                    success: true,
                    message: "Emergency alerts sent successfully".to_string(),
                    alerts_sent: delivered,
                })),
                Ok(_) => Err((
                    StatusCode::BAD_GATEWAY,
                    "No emergency contact could be reached".to_string(),
                )),
                Err(e) => {
                    error!("Emergency alert delivery failed: {}", e);
                    Err((
                        StatusCode::BAD_GATEWAY,
                        "Emergency alert delivery failed".to_string(),
                    ))
                }
            }
        }
        None => {
            // Demo mode: log what would have been sent, acknowledge everything.
            for contact in &request.contacts {
                info!(
                    "[DEMO MODE] Emergency alert for {} would be sent to {} ({})",
                    request.user_name, contact.phone, contact.name
                );
            }
            Ok(Json(EmergencyResponse {
                success: true,
                message: format!(
                    "[DEMO MODE] Emergency alert would be sent to {} contacts",
                    request.contacts.len()
                ),
                alerts_sent: request.contacts.len(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;
    use seniorsync_core::ports::{AlertService, PortResult};

    fn contacts(n: usize) -> Vec<EmergencyContact> {
        (0..n)
            .map(|i| EmergencyContact {
                name: format!("Contact {}", i),
                phone: format!("+1555000{:04}", i),
                relationship: "family".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_contact_list_is_rejected() {
        let state = Arc::new(unconfigured_state());
        let result = send_alert_handler(
            State(state),
            Json(EmergencyRequest {
                user_name: "Marta".to_string(),
                contacts: vec![],
                location: None,
            }),
        )
        .await;

        let err = result.err().expect("empty contacts should be rejected");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn demo_mode_acknowledges_every_contact() {
        let state = Arc::new(unconfigured_state());
        let result = send_alert_handler(
            State(state),
            Json(EmergencyRequest {
                user_name: "Marta".to_string(),
                contacts: contacts(3),
                location: Some("Hlavna 5".to_string()),
            }),
        )
        .await;

        let response = result.expect("demo mode always succeeds").into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["alerts_sent"], 3);
        assert!(parsed["message"].as_str().unwrap().contains("[DEMO MODE]"));
    }

    struct ZeroDeliveryAlerts;

    #[async_trait::async_trait]
    impl AlertService for ZeroDeliveryAlerts {
        async fn send_alert(
            &self,
            _numbers: &[String],
            _user_name: &str,
            _location: Option<&str>,
        ) -> PortResult<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn configured_delivery_requires_at_least_one_success() {
        let mut state = unconfigured_state();
        state.alerts = Some(Arc::new(ZeroDeliveryAlerts));
        let result = send_alert_handler(
            State(Arc::new(state)),
            Json(EmergencyRequest {
                user_name: "Marta".to_string(),
                contacts: contacts(2),
                location: None,
            }),
        )
        .await;

        let err = result.err().expect("zero deliveries must not report success");
        assert_eq!(err.0, StatusCode::BAD_GATEWAY);
    }
}
