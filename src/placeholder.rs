use crate::gallery::PlaceholderSource;
use anyhow::Result;
use async_trait::async_trait;
use cloudinary::Resource;
use image_utils::DataUriCache;
use reqwest::Client as ReqwestClient;

/// Cloudinary does the heavy lifting: it serves an 8px wide JPEG that we
/// only have to re-encode and inline.
pub const PLACEHOLDER_TRANSFORMATION: &str = "f_jpg,w_8,q_70";
pub const PLACEHOLDER_WIDTH: u32 = 8;
pub const PLACEHOLDER_QUALITY: u8 = 70;

pub struct CloudinaryPlaceholders {
    config: cloudinary::Config,
    http: ReqwestClient,
    cache: DataUriCache,
}

impl CloudinaryPlaceholders {
    pub fn new(config: cloudinary::Config) -> Self {
        Self::with_http(config, ReqwestClient::new())
    }

    pub fn with_http(config: cloudinary::Config, http: ReqwestClient) -> Self {
        Self {
            config,
            http,
            cache: DataUriCache::new(),
        }
    }

    pub fn preview_url(&self, resource: &Resource) -> String {
        cloudinary::delivery_url(
            &self.config,
            &resource.public_id,
            &resource.format,
            PLACEHOLDER_TRANSFORMATION,
        )
    }
}

#[async_trait]
impl PlaceholderSource for CloudinaryPlaceholders {
    async fn placeholder(&self, resource: &Resource) -> Result<String> {
        let url = self.preview_url(resource);
        self.cache
            .get_or_try_insert_with(&resource.public_id, || {
                image_utils::blur_data_uri(
                    &self.http,
                    &url,
                    PLACEHOLDER_WIDTH,
                    PLACEHOLDER_QUALITY,
                )
            })
            .await
    }
}
