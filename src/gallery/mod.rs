use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use cloudinary::{AssetSearch, Resource, SearchRequest, SortDirection};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

pub use image_utils::FALLBACK_DATA_URI;


pub const DEFAULT_FOLDER: &str = "metroo";
pub const DEFAULT_MAX_RESULTS: u32 = 400;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_PLACEHOLDER_TIMEOUT: Duration = Duration::from_secs(10);

/// One photograph as handed to the page.
///
/// Serializes with the field names the page template and `images.json`
/// consumers expect (`blurDataUrl` included).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRecord {
    pub id: usize,
    pub filename: String,
    pub height: u32,
    pub width: u32,
    pub public_id: String,
    pub format: String,
    pub alt: String,
    pub title: String,
    #[serde(rename = "blurDataUrl")]
    pub blur_data_url: String,
}

impl ImageRecord {
    fn from_resource(id: usize, resource: &Resource) -> Self {
        Self {
            id,
            filename: resource.filename.clone(),
            height: resource.height,
            width: resource.width,
            public_id: resource.public_id.clone(),
            format: resource.format.clone(),
            alt: resource.context_str("alt").unwrap_or_default().to_string(),
            title: resource
                .context_str("caption")
                .unwrap_or_default()
                .to_string(),
            blur_data_url: String::new(),
        }
    }
}

/// Produces the inline preview for a single asset.
#[async_trait]
pub trait PlaceholderSource: Send + Sync {
    async fn placeholder(&self, resource: &Resource) -> Result<String>;
}

/// What to do when one asset's preview cannot be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlaceholderPolicy {
    /// Swap in `FALLBACK_DATA_URI` and keep building.
    #[default]
    Fallback,
    /// Fail the whole build.
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerOptions {
    pub folder: String,
    pub max_results: u32,
    pub policy: PlaceholderPolicy,
    pub concurrency: usize,
    pub placeholder_timeout: Option<Duration>,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            policy: PlaceholderPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
            placeholder_timeout: Some(DEFAULT_PLACEHOLDER_TIMEOUT),
        }
    }
}

impl AssemblerOptions {
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest::new()
            .expression(format!("folder:{}/*", self.folder))
            .with_field("context")
            .sort_by("public_id", SortDirection::Desc)
            .max_results(self.max_results)
    }
}

/// Fetches the folder's assets and turns them into complete image records.
///
/// Records keep the order the search returned them in and are numbered
/// from zero. A failed search fails the whole call.
pub async fn assemble(
    search: &dyn AssetSearch,
    placeholders: &dyn PlaceholderSource,
    options: &AssemblerOptions,
) -> Result<Vec<ImageRecord>> {
    let request = options.search_request();
    let response = search.search(&request).await.with_context(|| {
        format!("Failed to query images in folder '{}'", options.folder)
    })?;

    let resources = response.resources;
    info!(
        folder = %options.folder,
        count = resources.len(),
        total = response.total_count,
        "Fetched gallery assets"
    );
    if response.next_cursor.is_some() {
        warn!(
            folder = %options.folder,
            max_results = options.max_results,
            total = response.total_count,
            "Folder holds more assets than max_results, gallery is truncated"
        );
    }

    let mut records: Vec<ImageRecord> = resources
        .iter()
        .enumerate()
        .map(|(index, resource)| ImageRecord::from_resource(index, resource))
        .collect();

    let previews =
        derive_placeholders(placeholders, &resources, options).await?;

    for record in records.iter_mut() {
        record.blur_data_url = previews
            .get(&record.public_id)
            .cloned()
            .unwrap_or_else(|| FALLBACK_DATA_URI.to_string());
    }

    Ok(records)
}

// Placeholders keyed by public_id. Completion order is irrelevant.
async fn derive_placeholders(
    source: &dyn PlaceholderSource,
    resources: &[Resource],
    options: &AssemblerOptions,
) -> Result<HashMap<String, String>> {
    let mut pending = stream::iter(resources.iter())
        .map(|resource| async move {
            let outcome = with_timeout(
                options.placeholder_timeout,
                source.placeholder(resource),
            )
            .await;
            (resource.public_id.as_str(), outcome)
        })
        .buffer_unordered(options.concurrency.max(1));

    let mut previews = HashMap::with_capacity(resources.len());
    let mut fallbacks = 0usize;

    while let Some((public_id, outcome)) = pending.next().await {
        let preview = match outcome {
            Ok(preview) => preview,
            Err(e) => match options.policy {
                PlaceholderPolicy::Abort => {
                    return Err(e.context(format!(
                        "Failed to derive placeholder for '{}'",
                        public_id
                    )));
                }
                PlaceholderPolicy::Fallback => {
                    warn!(public_id, error = %format!("{:#}", e), "Using fallback placeholder");
                    fallbacks += 1;
                    FALLBACK_DATA_URI.to_string()
                }
            },
        };
        previews.insert(public_id.to_string(), preview);
    }

    if fallbacks > 0 {
        warn!(fallbacks, "Some placeholders could not be derived");
    }

    Ok(previews)
}

async fn with_timeout<F>(limit: Option<Duration>, fut: F) -> Result<String>
where
    F: std::future::Future<Output = Result<String>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| anyhow!("Timed out after {:?}", limit))?,
        None => fut.await,
    }
}
