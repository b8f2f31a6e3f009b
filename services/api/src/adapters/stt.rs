//! services/api/src/adapters/stt.rs
//!
//! This module contains the adapter for OpenAI's Speech-to-Text (Whisper) service.
//! It implements the `SpeechToTextService` port from the `core` crate.
//!
//! Uploaded audio arrives as a complete encoded file (m4a, wav, mp3, ...);
//! it is handed to the API as-is. The buffer is owned by the request and
//! dropped on every exit path, success or failure.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::audio::{AudioInput, CreateTranscriptionRequest, CreateTranslationRequest},
    Client,
};
use async_trait::async_trait;
use seniorsync_core::ports::{PortError, PortResult, SpeechToTextService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SpeechToTextService` port using the OpenAI Whisper API.
#[derive(Clone)]
pub struct OpenAiSttAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSttAdapter {
    /// Creates a new `OpenAiSttAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `SpeechToTextService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SpeechToTextService for OpenAiSttAdapter {
    /// Transcribes audio into text using the configured Whisper model.
    /// The optional language hint improves accuracy but is not required.
    async fn transcribe(&self, audio: Vec<u8>, language: Option<&str>) -> PortResult<String> {
        let input = AudioInput::from_vec_u8("user_audio.m4a".into(), audio);

        let request = CreateTranscriptionRequest {
            file: input,
            model: self.model.clone(),
            language: language.map(|l| l.to_string()),
            ..Default::default()
        };

        // Call the API and manually map the error, which respects the orphan rule.
        let response = super::bounded(async {
            self.client
                .audio()
                .transcription()
                .create(request)
                .await
                .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))
        })
        .await?;

        Ok(response.text)
    }

    /// Transcribes audio and translates the result to English. The Whisper
    /// translation endpoint only targets English.
    async fn translate(&self, audio: Vec<u8>) -> PortResult<String> {
        let input = AudioInput::from_vec_u8("user_audio.m4a".into(), audio);

        let request = CreateTranslationRequest {
            file: input,
            model: self.model.clone(),
            ..Default::default()
        };

        let response = super::bounded(async {
            self.client
                .audio()
                .translation()
                .create(request)
                .await
                .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))
        })
        .await?;

        Ok(response.text)
    }
}
