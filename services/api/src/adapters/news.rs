//! services/api/src/adapters/news.rs
//!
//! This module contains the adapter for the NewsAPI top-headlines endpoint.
//! It implements the `NewsService` port from the `core` crate.

use async_trait::async_trait;
use seniorsync_core::{
    domain::NewsArticle,
    ports::{NewsService, PortError, PortResult},
};
use serde::Deserialize;

const NEWS_URL: &str = "https://newsapi.org/v2/top-headlines";

//=========================================================================================
// Upstream Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct NewsReply {
    status: String,
    #[serde(default, rename = "totalResults")]
    total_results: u32,
    #[serde(default)]
    articles: Vec<NewsReplyArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsReplyArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    source: NewsReplySource,
}

#[derive(Debug, Default, Deserialize)]
struct NewsReplySource {
    #[serde(default)]
    name: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `NewsService` port against NewsAPI.
#[derive(Clone)]
pub struct NewsApiAdapter {
    http: reqwest::Client,
    api_key: String,
}

impl NewsApiAdapter {
    /// Creates a new `NewsApiAdapter`.
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    fn map_transport_error(e: reqwest::Error) -> PortError {
        if e.is_timeout() {
            PortError::Timeout
        } else {
            PortError::Upstream(e.to_string())
        }
    }
}

//=========================================================================================
// `NewsService` Trait Implementation
//=========================================================================================

#[async_trait]
impl NewsService for NewsApiAdapter {
    /// Fetches top headlines for a country, optionally filtered by category.
    async fn top_headlines(
        &self,
        country: &str,
        category: Option<&str>,
        page_size: u32,
    ) -> PortResult<(Vec<NewsArticle>, u32)> {
        let mut query = vec![
            ("apiKey", self.api_key.clone()),
            ("country", country.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }

        let response = self
            .http
            .get(NEWS_URL)
            .query(&query)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        if !response.status().is_success() {
            return Err(PortError::Upstream(format!(
                "NewsAPI returned status {}",
                response.status()
            )));
        }

        let reply: NewsReply = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        if reply.status != "ok" {
            return Err(PortError::Upstream(format!(
                "NewsAPI returned status field '{}'",
                reply.status
            )));
        }

        let articles = reply
            .articles
            .into_iter()
            .map(|article| NewsArticle {
                title: article.title.unwrap_or_else(|| "No title".to_string()),
                description: article.description,
                url: article.url.unwrap_or_default(),
                url_to_image: article.url_to_image,
                published_at: article.published_at.unwrap_or_default(),
                source: article.source.name.unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect();

        Ok((articles, reply.total_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_tolerates_missing_optional_fields() {
        let reply: NewsReply = serde_json::from_str(
            r#"{"status":"ok","totalResults":1,
                "articles":[{"source":{"name":"Daily"},"url":"https://example.com"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.status, "ok");
        assert_eq!(reply.total_results, 1);
        let article = &reply.articles[0];
        assert!(article.title.is_none());
        assert_eq!(article.source.name.as_deref(), Some("Daily"));
    }
}
