//! services/api/src/web/news.rs
//!
//! The headlines endpoint. Read-oriented and informational, so upstream
//! failures degrade silently to the static fallback articles.

use crate::fallbacks;
use crate::web::state::AppState;
use crate::web::{degrades_to_fallback, surface_error};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use seniorsync_core::domain::NewsArticle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const PAGE_SIZE: u32 = 10;

fn default_country() -> String {
    "us".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

/// Query parameters for the headlines endpoint.
#[derive(Deserialize)]
pub struct NewsQuery {
    #[serde(default = "default_country")]
    pub country: String,
    pub category: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

/// The headline list returned to the frontend.
#[derive(Serialize)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
    #[serde(rename = "totalResults")]
    pub total_results: u32,
}

/// Picks the country to query. When the caller left the default country we
/// derive a more relevant one from their language.
fn resolve_country(country: &str, language: &str) -> String {
    if country != "us" {
        return country.to_string();
    }
    match language {
        "en" => "us",
        "de" => "de",
        "sk" => "sk",
        "cs" => "cz",
        _ => country,
    }
    .to_string()
}

/// Fetch top news headlines.
pub async fn get_news_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let country = resolve_country(&query.country, &query.language);

    let (articles, total_results) = match &app_state.news {
        Some(news) => {
            match news
                .top_headlines(&country, query.category.as_deref(), PAGE_SIZE)
                .await
            {
                Ok(result) => result,
                Err(e) if degrades_to_fallback(&e) => {
                    warn!("News upstream failed, serving fallback headlines: {}", e);
                    let articles = fallbacks::news();
                    let total = articles.len() as u32;
                    (articles, total)
                }
                Err(e) => return Err(surface_error("news", e)),
            }
        }
        None => {
            let articles = fallbacks::news();
            let total = articles.len() as u32;
            (articles, total)
        }
    };

    Ok(Json(NewsResponse {
        articles,
        total_results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::unconfigured_state;

    #[test]
    fn language_refines_the_default_country_only() {
        assert_eq!(resolve_country("us", "sk"), "sk");
        assert_eq!(resolve_country("us", "cs"), "cz");
        assert_eq!(resolve_country("us", "en"), "us");
        assert_eq!(resolve_country("gb", "de"), "gb");
    }

    #[tokio::test]
    async fn missing_credential_serves_fallback_headlines() {
        let state = Arc::new(unconfigured_state());
        let result = get_news_handler(
            State(state),
            Query(NewsQuery {
                country: default_country(),
                category: None,
                language: default_language(),
            }),
        )
        .await;

        let response = result.expect("fallback must satisfy the contract").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let articles = parsed["articles"].as_array().unwrap();
        assert!(!articles.is_empty());
        assert_eq!(parsed["totalResults"], articles.len() as u64);
    }
}
