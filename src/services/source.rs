//! Page sources.
//!
//! A `PageSource` returns the full body of a page; callers parse it with
//! `scraper::Html` once the body is in hand.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::utils::http;

/// Something that can return the HTML body for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Live source backed by an HTTP client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        http::fetch_text(&self.client, url).await
    }
}
