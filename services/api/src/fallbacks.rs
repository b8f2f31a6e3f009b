//! services/api/src/fallbacks.rs
//!
//! Static and time-conditioned substitute payloads served when an upstream
//! adapter is unconfigured, errors, or times out. Every payload here has the
//! exact same shape as a genuine upstream result, so callers cannot tell the
//! difference structurally.

use chrono::{Local, Timelike};
use seniorsync_core::domain::{Activity, NewsArticle, RiskLevel, ScamAssessment, WeatherSnapshot};
use serde::Serialize;

/// Night window for the weather fallback: 6 PM through 6 AM local time.
fn is_night(hour: u32) -> bool {
    hour >= 18 || hour < 6
}

/// The weather substitute for a given local hour. Two fixed variants only.
pub fn weather_for_hour(hour: u32) -> WeatherSnapshot {
    if is_night(hour) {
        WeatherSnapshot {
            temperature: 8,
            description: "Clear Night".to_string(),
            icon: "01n".to_string(),
            humidity: 65,
            feels_like: 6,
            city: "Your location".to_string(),
        }
    } else {
        WeatherSnapshot {
            temperature: 15,
            description: "Partly Cloudy".to_string(),
            icon: "02d".to_string(),
            humidity: 55,
            feels_like: 14,
            city: "Your location".to_string(),
        }
    }
}

/// The weather substitute for right now.
pub fn weather() -> WeatherSnapshot {
    weather_for_hour(Local::now().hour())
}

/// The fixed five-activity mock list served when the places upstream is
/// unreachable. Every entry is wheelchair accessible.
pub fn activities() -> Vec<Activity> {
    let mock = |name: &str, address: &str, distance: f64, rating: f32, types: &[&str], phone: &str| {
        Activity {
            name: name.to_string(),
            address: address.to_string(),
            distance,
            rating: Some(rating),
            types: types.iter().map(|t| t.to_string()).collect(),
            wheelchair_accessible: true,
            phone: Some(phone.to_string()),
        }
    };

    vec![
        mock(
            "Sunshine Senior Center",
            "123 Main St, Your City",
            800.0,
            4.5,
            &["senior_center", "community"],
            "+1-555-0101",
        ),
        mock(
            "Community Garden Club",
            "456 Park Ave, Your City",
            1200.0,
            4.8,
            &["community", "gardening"],
            "+1-555-0102",
        ),
        mock(
            "Weekly Bingo Night",
            "789 Community Hall, Your City",
            1500.0,
            4.3,
            &["social", "games"],
            "+1-555-0103",
        ),
        mock(
            "Gentle Yoga for Seniors",
            "321 Wellness Center, Your City",
            2000.0,
            4.7,
            &["fitness", "health"],
            "+1-555-0104",
        ),
        mock(
            "Library Book Club",
            "555 Library Lane, Your City",
            900.0,
            4.6,
            &["social", "education"],
            "+1-555-0105",
        ),
    ]
}

/// A scam assessment paired with the message it describes, for the demo
/// examples endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ScamExample {
    pub message: String,
    #[serde(flatten)]
    pub assessment: ScamAssessment,
}

/// Pre-loaded scam examples served by `/api/scam/examples`. Static data, no
/// upstream call; repeated requests return byte-identical payloads.
pub fn scam_examples() -> Vec<ScamExample> {
    let example = |message: &str, risk_level, explanation: &str, indicators: &[&str]| ScamExample {
        message: message.to_string(),
        assessment: ScamAssessment {
            risk_level,
            explanation: explanation.to_string(),
            indicators: indicators.iter().map(|i| i.to_string()).collect(),
        },
    };

    vec![
        example(
            "URGENT: Your bank account will be closed in 24 hours. Click here to verify: http://fake-bank.com",
            RiskLevel::Danger,
            "This is a dangerous scam. Real banks never ask you to click links in messages or threaten to close your account suddenly.",
            &[
                "Creates false urgency",
                "Suspicious link",
                "Threatens account closure",
                "Not from official bank contact",
            ],
        ),
        example(
            "Hi Grandma, it's me! I'm in trouble and need money urgently. Can you send $500 via gift cards?",
            RiskLevel::Danger,
            "This is a 'grandparent scam.' Scammers pretend to be family members in trouble. Always verify by calling your family member directly.",
            &[
                "Impersonation",
                "Urgent money request",
                "Asks for gift cards",
                "Creates emotional pressure",
            ],
        ),
        example(
            "You've won a $10,000 prize! Send us $200 processing fee to claim your winnings.",
            RiskLevel::Danger,
            "This is a classic prize scam. You never have to pay to receive a legitimate prize.",
            &[
                "Too good to be true",
                "Requests money upfront",
                "No legitimate source",
                "Unsolicited prize claim",
            ],
        ),
        example(
            "Your prescription is ready for pickup at CVS Pharmacy. Reply YES to confirm.",
            RiskLevel::Warning,
            "This could be legitimate if you have a prescription at CVS. However, verify by calling your pharmacy directly, not replying to this message.",
            &[
                "Could be legitimate",
                "Verify through official channels",
                "Don't reply to unknown numbers",
            ],
        ),
        example(
            "Hi Mom, just checking in! How was your doctor appointment today? Love you!",
            RiskLevel::Safe,
            "This appears to be a genuine message from a family member checking on you.",
            &[
                "Personal and caring tone",
                "No requests for money or information",
                "Appears legitimate",
            ],
        ),
    ]
}

/// Static headlines served when the news upstream is unreachable, so the
/// headlines screen always has something to show.
pub fn news() -> Vec<NewsArticle> {
    let article = |title: &str, description: &str, source: &str| NewsArticle {
        title: title.to_string(),
        description: Some(description.to_string()),
        url: "https://example.com/news".to_string(),
        url_to_image: None,
        published_at: "2024-01-01T08:00:00Z".to_string(),
        source: source.to_string(),
    };

    vec![
        article(
            "Community center expands weekday programs for seniors",
            "Local organizers announced new morning classes ranging from gentle exercise to computer basics.",
            "Community Times",
        ),
        article(
            "Health officials share simple tips for staying active in winter",
            "Short indoor walks and light stretching go a long way, experts say.",
            "Daily Health",
        ),
        article(
            "Library launches large-print book delivery service",
            "Readers can now have large-print titles delivered to their door once a week.",
            "City Library News",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_fallback_selects_night_payload_in_night_window() {
        for hour in (18..24).chain(0..6) {
            let snapshot = weather_for_hour(hour);
            assert_eq!(snapshot.description, "Clear Night", "hour {}", hour);
            assert_eq!(snapshot.temperature, 8);
            assert_eq!(snapshot.icon, "01n");
        }
    }

    #[test]
    fn weather_fallback_selects_day_payload_otherwise() {
        for hour in 6..18 {
            let snapshot = weather_for_hour(hour);
            assert_eq!(snapshot.description, "Partly Cloudy", "hour {}", hour);
            assert_eq!(snapshot.temperature, 15);
            assert_eq!(snapshot.icon, "02d");
        }
    }

    #[test]
    fn weather_fallback_window_fenceposts() {
        assert_eq!(weather_for_hour(17).icon, "02d");
        assert_eq!(weather_for_hour(18).icon, "01n");
        assert_eq!(weather_for_hour(5).icon, "01n");
        assert_eq!(weather_for_hour(6).icon, "02d");
    }

    #[test]
    fn mock_activities_are_five_accessible_nearby_places() {
        let activities = activities();
        assert_eq!(activities.len(), 5);
        for activity in &activities {
            assert!(activity.distance >= 0.0);
            assert!(activity.wheelchair_accessible);
        }
    }

    #[test]
    fn scam_examples_are_static_across_calls() {
        let first = serde_json::to_vec(&scam_examples()).unwrap();
        let second = serde_json::to_vec(&scam_examples()).unwrap();
        assert_eq!(first, second);
        assert_eq!(scam_examples().len(), 5);
    }
}
