//! crates/seniorsync_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the gateway's capabilities.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific upstream API implementations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Activity, ChatMessage, FactCheckResult, GeoPoint, MedicationDraft, MedicationRecord,
    NewsArticle, ScamAssessment, UserContext, WeatherSnapshot,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The failure modes shared by all port operations.
///
/// Each variant carries enough for the web layer to make an explicit
/// degrade-to-fallback or propagate decision; nothing is masked inside
/// an adapter.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The requested item does not exist.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The capability is not configured (credential absent at startup).
    #[error("Upstream not configured: {0}")]
    Unavailable(String),
    /// The remote call completed with a non-success status.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// The remote call exceeded the bounded wait.
    #[error("Upstream call timed out")]
    Timeout,
    /// A structured reply could not be parsed into its schema.
    /// This is a bug signal and must never degrade to a fallback payload.
    #[error("Malformed upstream reply: {0}")]
    MalformedReply(String),
    /// Anything else.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Conversational companion backed by an upstream chat model.
#[async_trait]
pub trait CompanionChatService: Send + Sync {
    /// Produces the assistant's next reply for the given conversation.
    /// The adapter owns persona construction; `user_context` enriches it.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        user_context: Option<&UserContext>,
    ) -> PortResult<String>;
}

/// Analyzes a message for scam indicators, replying in the requested language.
#[async_trait]
pub trait ScamAnalysisService: Send + Sync {
    async fn analyze(&self, message: &str, language: &str) -> PortResult<ScamAssessment>;
}

/// Verifies a claim, replying in the requested language.
#[async_trait]
pub trait FactCheckService: Send + Sync {
    async fn check(
        &self,
        claim: &str,
        context: Option<&str>,
        language: &str,
    ) -> PortResult<FactCheckResult>;
}

/// Current weather conditions for a coordinate pair.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> PortResult<WeatherSnapshot>;
}

/// Nearby points of interest around a location.
#[async_trait]
pub trait PlacesService: Send + Sync {
    /// Returns at most 10 results ranked by the upstream.
    async fn search(
        &self,
        location: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> PortResult<Vec<Activity>>;
}

/// Top news headlines.
#[async_trait]
pub trait NewsService: Send + Sync {
    /// Returns up to `page_size` articles plus the upstream's total count.
    async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        page_size: u32,
    ) -> PortResult<(Vec<NewsArticle>, u32)>;
}

/// Sends an emergency message to a set of phone numbers.
#[async_trait]
pub trait AlertService: Send + Sync {
    /// Attempts delivery to every number independently; one failure does
    /// not abort the rest. Returns how many numbers actually received
    /// the message.
    async fn send_alert(
        &self,
        numbers: &[String],
        user_name: &str,
        location: Option<&str>,
    ) -> PortResult<usize>;
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes audio data into text, optionally hinting the spoken language.
    async fn transcribe(&self, audio: Vec<u8>, language: Option<&str>) -> PortResult<String>;

    /// Transcribes audio data and translates the result to English.
    async fn translate(&self, audio: Vec<u8>) -> PortResult<String>;
}

/// The process-lifetime medication table. Nothing here survives a restart.
#[async_trait]
pub trait MedicationStore: Send + Sync {
    /// Stores a new record, assigning a fresh unique id and creation time.
    async fn put(&self, draft: MedicationDraft) -> PortResult<MedicationRecord>;

    /// All records whose user_id matches exactly, oldest first.
    async fn list(&self, user_id: &str) -> PortResult<Vec<MedicationRecord>>;

    /// Fully replaces the record with the given id, keeping its id and
    /// creation time. Fails with `NotFound` if the id is absent.
    async fn replace(&self, id: Uuid, draft: MedicationDraft) -> PortResult<MedicationRecord>;

    /// Removes the record with the given id. Fails with `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> PortResult<()>;
}
