use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose;
use base64::Engine;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use mime_guess::MimeGuess;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::{Mutex, OnceCell};

#[cfg(test)]
mod tests;

/// 1x1 transparent GIF, used wherever a real preview could not be produced.
pub const FALLBACK_DATA_URI: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

pub async fn get_image_bytes(client: &ReqwestClient, url: &str) -> Result<Bytes> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download image from URL: {}", url))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!(
            "Image download from {} failed with status: {}",
            url,
            status
        ));
    }

    resp.bytes()
        .await
        .with_context(|| format!("Failed to get bytes from response: {}", url))
}

pub fn encode_bytes_as_data_uri(bytes: &[u8], mime_type: &str) -> String {
    let encoded_data = general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, encoded_data)
}

pub async fn encode_file_as_data_uri(file_path: &str) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .with_context(|| format!("Failed to open file: {}", file_path))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .await
        .with_context(|| format!("Failed to read file: {}", file_path))?;

    let mime_type = MimeGuess::from_path(file_path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(encode_bytes_as_data_uri(&buffer, &mime_type))
}

/// Decodes an image, shrinks it to at most `max_width` pixels wide and
/// re-encodes it as a JPEG at the given quality.
///
/// Images already narrower than `max_width` are only re-encoded.
pub fn minify_jpeg(bytes: &[u8], max_width: u32, quality: u8) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .context("Failed to decode image for preview")?;

    let img = if img.width() > max_width {
        let height = scaled_height(img.width(), img.height(), max_width);
        img.resize_exact(max_width, height, FilterType::Triangle)
    } else {
        img
    };

    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
        .context("Failed to encode preview as JPEG")?;

    Ok(out.into_inner())
}

fn scaled_height(width: u32, height: u32, new_width: u32) -> u32 {
    let scaled = (height as u64 * new_width as u64) / width.max(1) as u64;
    (scaled as u32).max(1)
}

/// Downloads an image and turns it into a small inline JPEG data URI.
pub async fn blur_data_uri(
    client: &ReqwestClient,
    url: &str,
    max_width: u32,
    quality: u8,
) -> Result<String> {
    let bytes = get_image_bytes(client, url).await?;
    let minified = minify_jpeg(&bytes, max_width, quality)
        .with_context(|| format!("Failed to minify preview from {}", url))?;
    tracing::trace!(url, size = minified.len(), "Minified preview");
    Ok(encode_bytes_as_data_uri(&minified, "image/jpeg"))
}

/// Memoizes data URIs by key.
///
/// Concurrent callers asking for the same key share a single computation.
#[derive(Default)]
pub struct DataUriCache {
    cells: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl DataUriCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_try_insert_with<F, Fut>(
        &self,
        key: &str,
        init: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(key.to_string()).or_default().clone()
        };

        cell.get_or_try_init(init).await.cloned()
    }

    pub async fn cached_count(&self) -> usize {
        let cells = self.cells.lock().await;
        cells.values().filter(|cell| cell.initialized()).count()
    }
}
