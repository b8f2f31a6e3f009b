//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the companion chat LLM.
//! It implements the `CompanionChatService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    error::OpenAIError,
    Client,
};
use async_trait::async_trait;
use seniorsync_core::{
    domain::{ChatMessage, Role, UserContext},
    ports::{CompanionChatService, PortError, PortResult},
};

const COMPANION_SYSTEM_PROMPT: &str = r#"You are a patient, respectful AI companion for elderly users.
Your role is to:
- Use simple, clear language without technical jargon
- Speak warmly and respectfully, like a caring friend
- Confirm understanding often and repeat information if needed
- Prioritize safety and wellbeing
- Be patient with mishearing or confusion
- Offer help proactively but not intrusively
- Alert family members if you detect concerning patterns
- Ask for the user's name and preferences naturally in conversation
- Remember details they share with you throughout the conversation
- Respond in the user's preferred language automatically
- If the user speaks to you in a different language, respond in that same language

Remember: Your users may have vision issues, hearing difficulties, or memory concerns.
Always be kind, patient, and supportive. Learn about them through natural conversation.
Adapt to their language automatically without mentioning the language switch."#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompanionChatService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the system prompt, appending a textual summary of the user
    /// context when one was supplied.
    fn system_prompt(user_context: Option<&UserContext>) -> String {
        let mut prompt = COMPANION_SYSTEM_PROMPT.to_string();
        if let Some(context) = user_context {
            let mut info = String::from("\n\nUser Information:\n");
            if let Some(age) = context.age {
                info.push_str(&format!("Age: {}\n", age));
            }
            if let Some(medications) = &context.medications {
                if !medications.is_empty() {
                    info.push_str(&format!(
                        "Current Medications: {}\n",
                        medications.join(", ")
                    ));
                }
            }
            prompt.push_str(&info);
        }
        prompt
    }
}

//=========================================================================================
// `CompanionChatService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompanionChatService for OpenAiChatAdapter {
    /// Produces the assistant's next conversational reply. The reply is
    /// freeform text; no structural validation is applied.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        user_context: Option<&UserContext>,
    ) -> PortResult<String> {
        let mut request_messages: Vec<ChatCompletionRequestMessage> = Vec::new();
        request_messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(Self::system_prompt(user_context))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );
        for message in messages {
            let built = match message.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            };
            request_messages.push(built);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .temperature(0.7)
            .max_tokens(500u32)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API under the shared bound and manually map the error,
        // which respects the orphan rule.
        let response = super::bounded(async {
            self.client
                .chat()
                .create(request)
                .await
                .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))
        })
        .await?;

        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Upstream(
                    "Chat LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Upstream(
                "Chat LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_appends_user_context_summary() {
        let context = UserContext {
            age: Some(78),
            medications: Some(vec!["Aspirin".to_string(), "Metformin".to_string()]),
        };
        let prompt = OpenAiChatAdapter::system_prompt(Some(&context));
        assert!(prompt.starts_with(COMPANION_SYSTEM_PROMPT));
        assert!(prompt.contains("Age: 78"));
        assert!(prompt.contains("Current Medications: Aspirin, Metformin"));
    }

    #[test]
    fn system_prompt_without_context_is_the_bare_persona() {
        assert_eq!(OpenAiChatAdapter::system_prompt(None), COMPANION_SYSTEM_PROMPT);
    }
}
