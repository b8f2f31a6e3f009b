//! services/api/src/web/speech.rs
//!
//! Transcription endpoints. Audio arrives as a multipart upload and there is
//! no meaningful substitute for a transcript, so failures surface explicitly.

use crate::web::state::AppState;
use crate::web::surface_error;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// The parts accepted by both speech endpoints: a required `audio` file and
/// an optional `language` text field.
struct SpeechUpload {
    audio: Vec<u8>,
    language: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<SpeechUpload, (StatusCode, String)> {
    let mut audio: Option<Vec<u8>> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        match field.name() {
            Some("audio") => {
                let data = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read audio bytes: {}", e),
                    )
                })?;
                audio = Some(data.to_vec());
            }
            Some("language") => {
                let text = field.text().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read language field: {}", e),
                    )
                })?;
                if !text.trim().is_empty() {
                    language = Some(text);
                }
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            "Multipart form must include an audio file".to_string(),
        )
    })?;

    if audio.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Uploaded audio file is empty".to_string(),
        ));
    }

    Ok(SpeechUpload { audio, language })
}

/// Transcribe an uploaded audio file to text.
pub async fn transcribe_handler(
    State(app_state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let upload = read_upload(multipart).await?;

    let speech = app_state.speech.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "The speech service is not configured".to_string(),
        )
    })?;

    match speech
        .transcribe(upload.audio, upload.language.as_deref())
        .await
    {
        Ok(text) => Ok(Json(json!({ "success": true, "text": text }))),
        Err(e) => {
            error!("Transcription failed: {}", e);
            Err(surface_error("speech", e))
        }
    }
}

/// Transcribe an uploaded audio file and translate it to English.
pub async fn transcribe_translate_handler(
    State(app_state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let upload = read_upload(multipart).await?;

    let speech = app_state.speech.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "The speech service is not configured".to_string(),
        )
    })?;

    match speech.translate(upload.audio).await {
        Ok(text) => Ok(Json(json!({
            "success": true,
            "text": text,
            "language": "en"
        }))),
        Err(e) => {
            error!("Translation failed: {}", e);
            Err(surface_error("speech", e))
        }
    }
}
