use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;

pub mod config;
pub mod models;

pub use config::Config;
pub use models::{Resource, SearchRequest, SearchResponse, SortDirection};


/// Anything that can answer a Cloudinary search.
///
/// The page build only talks to this trait, so tests can hand it a canned
/// result set instead of the live API.
#[async_trait]
pub trait AssetSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

pub struct Client {
    config: Config,
    http: ReqwestClient,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self::with_http(config, ReqwestClient::new())
    }

    pub fn with_http(config: Config, http: ReqwestClient) -> Self {
        Self { config, http }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }
}

#[async_trait]
impl AssetSearch for Client {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.config.search_url();
        tracing::debug!(
            expression = ?request.expression,
            max_results = ?request.max_results,
            "Searching Cloudinary"
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send search request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Cloudinary search failed with status {}: {}",
                status,
                error_message(&body)
            ));
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read Cloudinary search response")?;

        serde_json::from_slice(&body)
            .context("Failed to parse Cloudinary search response")
    }
}

/// Builds a delivery URL for an uploaded image, e.g.
/// `https://res.cloudinary.com/<cloud>/image/upload/w_1080/<id>.jpg`.
pub fn delivery_url(
    config: &Config,
    public_id: &str,
    format: &str,
    transformation: &str,
) -> String {
    let base = config.delivery_base.trim_end_matches('/');
    let transformation = transformation.trim_matches('/');
    if transformation.is_empty() {
        format!(
            "{}/{}/image/upload/{}.{}",
            base, config.cloud_name, public_id, format
        )
    } else {
        format!(
            "{}/{}/image/upload/{}/{}.{}",
            base, config.cloud_name, transformation, public_id, format
        )
    }
}

// Cloudinary wraps failures as {"error": {"message": ".."}}
fn error_message(body: &str) -> String {
    match serde_json::from_str::<models::ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}
