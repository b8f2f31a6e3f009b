//! crates/seniorsync_core/src/domain.rs
//!
//! Defines the pure, core data structures for the gateway.
//! These structs are independent of any upstream API's wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The author of one turn in a companion-chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a companion-chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Optional details about the user, folded into the companion's
/// system prompt when supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    pub age: Option<u32>,
    pub medications: Option<Vec<String>>,
}

/// How risky an analyzed message looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

/// The result of running a suspicious message through the scam analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScamAssessment {
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    True,
    False,
    Unclear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The result of verifying a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub explanation: String,
    pub sources: Vec<String>,
}

/// Current conditions at one location, metric units, whole degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub feels_like: i32,
    pub city: String,
}

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One nearby point of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub address: String,
    /// Distance from the search location in meters, never negative.
    pub distance: f64,
    pub rating: Option<f32>,
    pub types: Vec<String>,
    pub wheelchair_accessible: bool,
    pub phone: Option<String>,
}

/// A stored medication schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub dosage: String,
    /// Dose times as "HH:MM" strings, e.g. ["08:00", "20:00"].
    pub times: Vec<String>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied medication fields, before the store assigns an id
/// and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationDraft {
    pub user_id: String,
    pub name: String,
    pub dosage: String,
    pub times: Vec<String>,
    pub instructions: Option<String>,
}

/// One family member to notify during an emergency. Exists only for
/// the duration of the alert request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// One headline from the news upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub source: String,
}

/// Maps a frontend locale code to the language name used in prompts.
/// Unknown codes fall back to English.
pub fn language_name(code: &str) -> &'static str {
    match code {
        "en-US" => "English",
        "sk-SK" => "Slovak",
        "cs-CZ" => "Czech",
        "de-DE" => "German",
        _ => "English",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_uses_lowercase_wire_form() {
        assert_eq!(serde_json::to_string(&RiskLevel::Danger).unwrap(), "\"danger\"");
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"warning\"").unwrap(),
            RiskLevel::Warning
        );
        assert!(serde_json::from_str::<RiskLevel>("\"severe\"").is_err());
    }

    #[test]
    fn verdict_and_confidence_reject_values_outside_enum() {
        assert_eq!(serde_json::from_str::<Verdict>("\"unclear\"").unwrap(), Verdict::Unclear);
        assert_eq!(serde_json::from_str::<Confidence>("\"high\"").unwrap(), Confidence::High);
        assert!(serde_json::from_str::<Verdict>("\"maybe\"").is_err());
        assert!(serde_json::from_str::<Confidence>("\"certain\"").is_err());
    }

    #[test]
    fn language_lookup_defaults_to_english() {
        assert_eq!(language_name("sk-SK"), "Slovak");
        assert_eq!(language_name("de-DE"), "German");
        assert_eq!(language_name("fr-FR"), "English");
        assert_eq!(language_name(""), "English");
    }
}
