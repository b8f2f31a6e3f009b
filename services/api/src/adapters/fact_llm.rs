//! services/api/src/adapters/fact_llm.rs
//!
//! This module contains the adapter for the fact-checking LLM.
//! It implements the `FactCheckService` port from the `core` crate.
//!
//! Same JSON-mode contract as the scam analyst: a reply outside the fixed
//! verdict/confidence schema is a `MalformedReply` and surfaces to the caller.

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
    domain::{language_name, FactCheckResult},
    ports::{FactCheckService, PortError, PortResult},
};

const CHECKER_SYSTEM_PROMPT: &str =
    "You are a fact-checker helping elderly users verify information. \
     Be clear, honest, and simple.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `FactCheckService` using an OpenAI-compatible
/// LLM in JSON mode.
#[derive(Clone)]
pub struct OpenAiFactCheckAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiFactCheckAdapter {
    /// Creates a new `OpenAiFactCheckAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn build_prompt(claim: &str, context: Option<&str>, lang_name: &str) -> String {
        let context_line = match context {
            Some(context) => format!("Context: {}\n", context),
            None => String::new(),
        };
        format!(
            r#"Verify this claim using your knowledge.

Claim: "{claim}"
{context_line}
Provide a simple explanation suitable for elderly users. Be honest about uncertainty.

IMPORTANT: Respond in {lang_name} language.

Respond in JSON format:
{{
    "verdict": "true" | "false" | "unclear",
    "confidence": "high" | "medium" | "low",
    "explanation": "Simple 2-3 sentence explanation in {lang_name}",
    "sources": ["source1 in {lang_name}", "source2 in {lang_name}"]
}}"#
        )
    }
}

//=========================================================================================
// `FactCheckService` Trait Implementation
//=========================================================================================

#[async_trait]
impl FactCheckService for OpenAiFactCheckAdapter {
    /// Verifies a claim, replying in the language selected by the caller's
    /// locale code.
    async fn check(
        &self,
        claim: &str,
        context: Option<&str>,
        language: &str,
    ) -> PortResult<FactCheckResult> {
        let lang_name = language_name(language);
        let prompt = Self::build_prompt(claim, context, lang_name);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(CHECKER_SYSTEM_PROMPT)
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
                PortError::Upstream("Fact checker returned no text content.".to_string())
            })?;

        serde_json::from_str::<FactCheckResult>(&content)
            .map_err(|e| PortError::MalformedReply(format!("{}: {}", e, content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seniorsync_core::domain::{Confidence, Verdict};

    #[test]
    fn prompt_includes_context_only_when_present() {
        let with = OpenAiFactCheckAdapter::build_prompt("claim", Some("from a TV show"), "Czech");
        assert!(with.contains("Context: from a TV show"));
        let without = OpenAiFactCheckAdapter::build_prompt("claim", None, "Czech");
        assert!(!without.contains("Context:"));
        assert!(without.contains("Respond in Czech language"));
    }

    #[test]
    fn well_formed_reply_parses_into_the_schema() {
        let reply = r#"{"verdict":"false","confidence":"medium","explanation":"Not so.","sources":["encyclopedia"]}"#;
        let result: FactCheckResult = serde_json::from_str(reply).unwrap();
        assert_eq!(result.verdict, Verdict::False);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn out_of_enum_verdict_fails_the_parse() {
        let reply = r#"{"verdict":"probably","confidence":"low","explanation":"x","sources":[]}"#;
        assert!(serde_json::from_str::<FactCheckResult>(reply).is_err());
    }
}
