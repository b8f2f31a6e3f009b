//! services/api/src/web/medications.rs
//!
//! CRUD handlers over the ephemeral medication store. The only endpoints
//! with side effects; no upstream API is involved.

use crate::web::state::AppState;
use crate::web::surface_error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::MedicationDraft;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// A medication payload as the frontend sends it. Any client-supplied id is
/// ignored; the store owns id assignment and the path id wins on update.
#[derive(Deserialize)]
pub struct MedicationPayload {
    pub user_id: String,
    pub name: String,
    pub dosage: String,
    pub times: Vec<String>,
    pub instructions: Option<String>,
}

impl From<MedicationPayload> for MedicationDraft {
    fn from(payload: MedicationPayload) -> Self {
        MedicationDraft {
            user_id: payload.user_id,
            name: payload.name,
            dosage: payload.dosage,
            times: payload.times,
            instructions: payload.instructions,
        }
    }
}

/// Add a new medication.
pub async fn create_medication_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<MedicationPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = app_state
        .medications
        .put(payload.into())
        .await
        .map_err(|e| surface_error("medication store", e))?;
    Ok(Json(record))
}

/// Get all medications for a user.
pub async fn list_medications_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let records = app_state
        .medications
        .list(&user_id)
        .await
        .map_err(|e| surface_error("medication store", e))?;
    Ok(Json(records))
}

/// Update a medication. 404 if the id is unknown.
pub async fn update_medication_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MedicationPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = app_state
        .medications
        .replace(id, payload.into())
        .await
        .map_err(|e| surface_error("medication store", e))?;
    Ok(Json(record))
}

/// Delete a medication. 404 if the id is unknown.
pub async fn delete_medication_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .medications
        .delete(id)
        .await
        .map_err(|e| surface_error("medication store", e))?;
    Ok(Json(
        serde_json::json!({ "message": "Medication deleted successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;
    use seniorsync_core::domain::MedicationRecord;

    fn payload(user_id: &str, name: &str) -> MedicationPayload {
        MedicationPayload {
            user_id: user_id.to_string(),
            name: name.to_string(),
            dosage: "81mg".to_string(),
            times: vec!["08:00".to_string()],
            instructions: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_round_trips_through_the_handlers() {
        let state = Arc::new(unconfigured_state());

        let created = create_medication_handler(
            State(state.clone()),
            Json(payload("u1", "Aspirin")),
        )
        .await
        .expect("create should succeed")
        .into_response();
        let created: MedicationRecord = serde_json::from_value(body_json(created).await).unwrap();
        assert!(!created.id.is_nil());

        let listed = list_medications_handler(State(state), Path("u1".to_string()))
            .await
            .expect("list should succeed")
            .into_response();
        let listed: Vec<MedicationRecord> =
            serde_json::from_value(body_json(listed).await).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn update_keeps_the_path_id_and_reflects_new_values() {
        let state = Arc::new(unconfigured_state());
        let created = create_medication_handler(
            State(state.clone()),
            Json(payload("u1", "Aspirin")),
        )
        .await
        .unwrap()
        .into_response();
        let created: MedicationRecord = serde_json::from_value(body_json(created).await).unwrap();

        let updated = update_medication_handler(
            State(state.clone()),
            Path(created.id),
            Json(payload("u1", "Ibuprofen")),
        )
        .await
        .expect("update should succeed")
        .into_response();
        let updated: MedicationRecord = serde_json::from_value(body_json(updated).await).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ibuprofen");
    }

    #[tokio::test]
    async fn delete_removes_and_unknown_ids_are_404() {
        let state = Arc::new(unconfigured_state());
        let created = create_medication_handler(
            State(state.clone()),
            Json(payload("u1", "Aspirin")),
        )
        .await
        .unwrap()
        .into_response();
        let created: MedicationRecord = serde_json::from_value(body_json(created).await).unwrap();

        delete_medication_handler(State(state.clone()), Path(created.id))
            .await
            .expect("delete should succeed");

        let listed = list_medications_handler(State(state.clone()), Path("u1".to_string()))
            .await
            .unwrap()
            .into_response();
        let listed: Vec<MedicationRecord> =
            serde_json::from_value(body_json(listed).await).unwrap();
        assert!(listed.is_empty());

        let err = delete_medication_handler(State(state.clone()), Path(Uuid::new_v4()))
            .await
            .err()
            .expect("unknown id should be 404");
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        let err = update_medication_handler(
            State(state),
            Path(Uuid::new_v4()),
            Json(payload("u1", "x")),
        )
        .await
        .err()
        .expect("unknown id should be 404");
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
