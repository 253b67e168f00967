//! Google News RSS source - keyless headline fallback.
//!
//! Headlines are the `<title>` of each `<item>` in the feed.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;

use crate::domain::signals::Headline;
use crate::ports::{NewsFeed, NewsSource, SourceError};

pub const GOOGLE_NEWS_RSS_URL: &str = "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en";

const SOURCE_NAME: &str = "google-news-rss";
const USER_AGENT: &str = "Recess/1.0";

pub struct GoogleNewsRssSource {
    url: String,
    timeout: Duration,
    client: Client,
}

impl GoogleNewsRssSource {
    pub fn new(client: Client) -> Self {
        Self {
            url: GOOGLE_NEWS_RSS_URL.to_string(),
            timeout: Duration::from_secs(8),
            client,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Item titles from an RSS document. The channel title is not an item
    /// and never appears. Malformed input yields whatever parsed before the
    /// error.
    pub fn parse_titles(xml: &str, limit: usize) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        let mut buf = Vec::new();

        let mut titles = Vec::new();
        let mut in_item = false;
        let mut current: Option<String> = None;

        while titles.len() < limit {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"item" => in_item = true,
                    b"title" if in_item => current = Some(String::new()),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some(title) = current.as_mut() {
                        title.push_str(&e.unescape().unwrap_or_default());
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(title) = current.as_mut() {
                        title.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"item" => in_item = false,
                    b"title" => {
                        if let Some(title) = current.take().filter(|t| !t.trim().is_empty()) {
                            titles.push(title.trim().to_string());
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        titles
    }
}

#[async_trait]
impl NewsSource for GoogleNewsRssSource {
    fn feeds(&self) -> Vec<NewsFeed> {
        vec![NewsFeed::new("rss", 10)]
    }

    async fn fetch_headlines(&self, feed: NewsFeed) -> Result<Vec<Headline>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::unavailable(
                SOURCE_NAME,
                format!("HTTP {}", response.status()),
            ));
        }

        let xml = response.text().await?;
        Ok(Self::parse_titles(&xml, feed.limit)
            .into_iter()
            .map(|title| Headline::new(title).with_source("Google News"))
            .collect())
    }
}
