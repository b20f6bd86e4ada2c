// src/services/fetcher.rs

//! Page fetching service.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;
use crate::utils::http;

/// Source of the monitored page body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the body text. Any transport failure is an
    /// `AppError::Fetch`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain unauthenticated GET over HTTP(S).
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_fetch_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("Fetching {}", url);
        let body = http::fetch_text(&self.client, url)
            .await
            .map_err(|e| AppError::fetch(url, e))?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
