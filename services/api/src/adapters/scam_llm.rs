//! services/api/src/adapters/scam_llm.rs
//!
//! This module contains the adapter for the scam-analysis LLM.
//! It implements the `ScamAnalysisService` port from the `core` crate.
//!
//! The upstream model is asked for a JSON object constrained to the fixed
//! risk-level schema. A reply that does not parse into that schema is a
//! `MalformedReply` and must surface to the caller, never a fallback.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use seniorsync_core::{
    domain::{language_name, ScamAssessment},
    ports::{PortError, PortResult, ScamAnalysisService},
};

const ANALYST_SYSTEM_PROMPT: &str =
    "You are a scam detection expert helping elderly users stay safe. \
     Explain findings simply and clearly.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ScamAnalysisService` using an OpenAI-compatible
/// LLM in JSON mode.
#[derive(Clone)]
pub struct OpenAiScamAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiScamAdapter {
    /// Creates a new `OpenAiScamAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn build_prompt(message: &str, lang_name: &str) -> String {
        format!(
            r#"Analyze this message for scam indicators. Look for:
- Urgency or threats (act now, limited time)
- Requests for money, gift cards, or personal information
- Grammar/spelling errors
- Impersonation of banks, government, family
- Too-good-to-be-true offers
- Suspicious links or phone numbers

Message: "{message}"

IMPORTANT: Respond in {lang_name} language.

Respond in JSON format:
{{
    "risk_level": "safe" | "warning" | "danger",
    "explanation": "Simple explanation suitable for elderly users (2-3 sentences) in {lang_name}",
    "indicators": ["list", "of", "red", "flags", "in", "{lang_name}"]
}}"#
        )
    }
}

//=========================================================================================
// `ScamAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScamAnalysisService for OpenAiScamAdapter {
    /// Analyzes a message for scam indicators, replying in the language
    /// selected by the caller's locale code.
    async fn analyze(&self, message: &str, language: &str) -> PortResult<ScamAssessment> {
        let lang_name = language_name(language);
        let prompt = Self::build_prompt(message, lang_name);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(ANALYST_SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            ])
            .temperature(0.3)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = super::bounded(async {
            self.client
                .chat()
                .create(request)
                .await
                .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))
        })
        .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Upstream("Scam analyst returned no text content.".to_string())
            })?;

        // The schema itself enforces the risk-level enum; anything outside
        // it fails the parse.
        serde_json::from_str::<ScamAssessment>(&content)
            .map_err(|e| PortError::MalformedReply(format!("{}: {}", e, content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seniorsync_core::domain::RiskLevel;

    #[test]
    fn prompt_names_the_target_language() {
        let prompt = OpenAiScamAdapter::build_prompt("hello", "Slovak");
        assert!(prompt.contains("Respond in Slovak language"));
        assert!(prompt.contains("Message: \"hello\""));
    }

    #[test]
    fn well_formed_reply_parses_into_the_schema() {
        let reply = r#"{"risk_level":"danger","explanation":"A scam.","indicators":["urgency"]}"#;
        let assessment: ScamAssessment = serde_json::from_str(reply).unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::Danger);
        assert_eq!(assessment.indicators, vec!["urgency".to_string()]);
    }

    #[test]
    fn out_of_enum_risk_level_fails_the_parse() {
        let reply = r#"{"risk_level":"critical","explanation":"x","indicators":[]}"#;
        assert!(serde_json::from_str::<ScamAssessment>(reply).is_err());
    }
}
