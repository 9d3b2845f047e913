use crate::config::Settings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.pexels.com";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 3;
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Ranked text-to-image lookup. Results carry no validity guarantee; callers
/// must probe before accepting one.
#[async_trait]
pub trait ImageSearchClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn search_images(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Lightweight existence check against a candidate image URL.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn is_live_image(&self, url: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct HttpImageSearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpImageSearchClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_image_search_api_key()?.to_string();
        let base_url = settings
            .image_search_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("IMAGE_SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build image search http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(&self.api_key)?);
        Ok(headers)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    medium: String,
}

#[async_trait]
impl ImageSearchClient for HttpImageSearchClient {
    fn provider_name(&self) -> &'static str {
        "pexels_http"
    }

    async fn search_images(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let url = format!("{}/v1/search", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(url)
            .headers(self.headers()?)
            .query(&[("query", query), ("per_page", &limit.to_string())])
            .send()
            .await
            .context("image search request failed")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!("image search HTTP {status}: {body}");
        }

        let parsed: SearchResponse = res
            .json()
            .await
            .context("failed to decode image search response")?;

        Ok(parsed.photos.into_iter().map(|p| p.src.medium).collect())
    }
}

/// HEAD-only probe: success requires 2xx and an image content type.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    http: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new() -> Result<Self> {
        let timeout_secs = std::env::var("IMAGE_PROBE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build image probe http client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn is_live_image(&self, url: &str) -> bool {
        let res = match self.http.head(url).send().await {
            Ok(res) => res,
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "image probe request failed");
                return false;
            }
        };

        if !res.status().is_success() {
            return false;
        }

        res.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false)
    }
}

/// Probe stand-in for resolvers that carry no network tiers.
pub struct NoProbe;

#[async_trait]
impl ImageProbe for NoProbe {
    async fn is_live_image(&self, _url: &str) -> bool {
        false
    }
}
