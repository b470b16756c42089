//! Web search transport and result documents.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::config::SearchConfig;

/// One result entry of a search response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// Parsed search response. A response without `items` has no results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchDocument {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

impl SearchDocument {
    /// All titles and snippets joined with spaces.
    pub fn aggregated_text(&self) -> String {
        self.items
            .iter()
            .flat_map(|item| [item.title.as_str(), item.snippet.as_str()])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What a single query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Document(SearchDocument),
    /// Transport or parse failure; scores zero
    Failed,
    /// The provider's automated-traffic page
    Blocked,
}

impl Payload {
    /// Classifies a raw transport result. The bot marker is checked before
    /// parsing so a blocked response is never mistaken for a bad document.
    pub fn from_response(response: Result<String>, bot_marker: &str) -> Self {
        let body = match response {
            Ok(body) => body,
            Err(e) => {
                crate::debug(&format!("search failed: {:#}", e));
                return Payload::Failed;
            }
        };

        if !bot_marker.is_empty() && body.contains(bot_marker) {
            return Payload::Blocked;
        }

        match serde_json::from_str::<SearchDocument>(&body) {
            Ok(doc) => Payload::Document(doc),
            Err(e) => {
                crate::debug(&format!("unparsable search response: {}", e));
                Payload::Failed
            }
        }
    }
}

/// Performs one search and returns the raw response body.
pub trait SearchBackend: Send + Sync {
    fn fetch(&self, term: &str) -> Result<String>;
}

/// Blocking HTTP client for a JSON search endpoint.
pub struct HttpSearch {
    client: reqwest::blocking::Client,
    config: SearchConfig,
}

impl HttpSearch {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url_for(&self, term: &str) -> Result<reqwest::Url> {
        let mut params = vec![("q", term)];
        if !self.config.api_key.is_empty() {
            params.push(("key", self.config.api_key.as_str()));
        }
        if !self.config.engine_id.is_empty() {
            params.push(("cx", self.config.engine_id.as_str()));
        }
        reqwest::Url::parse_with_params(&self.config.endpoint, &params)
            .with_context(|| format!("Invalid search endpoint: {}", self.config.endpoint))
    }
}

impl SearchBackend for HttpSearch {
    fn fetch(&self, term: &str) -> Result<String> {
        let url = self.url_for(term)?;
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        // Block pages usually come with an error status; hand them on so
        // they are classified instead of treated as a plain failure.
        let marker = self.config.bot_marker.as_str();
        if !status.is_success() && (marker.is_empty() || !body.contains(marker)) {
            return Err(anyhow!("Search request failed: HTTP {}", status));
        }

        Ok(body)
    }
}
