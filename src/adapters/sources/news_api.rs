//! NewsAPI source - top headlines per category from newsapi.org.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::signals::Headline;
use crate::ports::{NewsFeed, NewsSource, SourceError};

pub const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

const SOURCE_NAME: &str = "newsapi";

/// Categories fetched per request, with their headline budgets.
const FEEDS: [NewsFeed; 4] = [
    NewsFeed::new("general", 5),
    NewsFeed::new("technology", 3),
    NewsFeed::new("sports", 3),
    NewsFeed::new("entertainment", 3),
];

pub struct NewsApiSource {
    api_key: Secret<String>,
    base_url: String,
    country: String,
    timeout: Duration,
    client: Client,
}

impl NewsApiSource {
    pub fn new(api_key: Secret<String>, client: Client) -> Self {
        Self {
            api_key,
            base_url: NEWS_API_BASE_URL.to_string(),
            country: "us".to_string(),
            timeout: Duration::from_secs(8),
            client,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn parse_articles(body: ArticlesResponse) -> Result<Vec<Headline>, SourceError> {
        if body.status.as_deref() == Some("error") {
            return Err(SourceError::unavailable(
                SOURCE_NAME,
                body.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(body
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?.trim().to_string();
                if title.is_empty() || title == "[Removed]" {
                    return None;
                }
                let headline = Headline::new(title);
                Some(match article.source.and_then(|s| s.name) {
                    Some(name) => headline.with_source(name),
                    None => headline,
                })
            })
            .collect())
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn feeds(&self) -> Vec<NewsFeed> {
        FEEDS.to_vec()
    }

    async fn fetch_headlines(&self, feed: NewsFeed) -> Result<Vec<Headline>, SourceError> {
        let page_size = feed.limit.to_string();
        let response = self
            .client
            .get(format!("{}/top-headlines", self.base_url))
            .header("X-Api-Key", self.api_key.expose_secret())
            .query(&[
                ("country", self.country.as_str()),
                ("category", feed.category),
                ("pageSize", page_size.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(SourceError::unauthorized(SOURCE_NAME)),
            status if !status.is_success() && status != StatusCode::BAD_REQUEST => {
                return Err(SourceError::unavailable(SOURCE_NAME, format!("HTTP {}", status)));
            }
            _ => {}
        }

        let body: ArticlesResponse = response.json().await?;
        Self::parse_articles(body)
    }
}

#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}
