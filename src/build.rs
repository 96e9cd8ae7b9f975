use crate::content::SiteContent;
use crate::gallery::{self, AssemblerOptions, ImageRecord, PlaceholderSource};
use crate::page::{Capabilities, LayoutMode, PageState};
use crate::render::{self, PageRenderer, WrittenPage};
use anyhow::{anyhow, Context, Result};
use cloudinary::AssetSearch;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_OUT_DIR: &str = "./dist";
pub const DEFAULT_BUILD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub assembler: AssemblerOptions,
    pub out_dir: PathBuf,
    pub touch_screen: bool,
    pub initial_layout: LayoutMode,
    pub build_timeout: Option<Duration>,
    /// Local portrait to inline into the about overlay.
    pub portrait: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            assembler: AssemblerOptions::default(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            touch_screen: false,
            initial_layout: LayoutMode::default(),
            build_timeout: Some(DEFAULT_BUILD_TIMEOUT),
            portrait: None,
        }
    }
}

#[derive(Debug)]
pub struct BuildReport {
    pub images: Vec<ImageRecord>,
    pub written: WrittenPage,
}

/// Runs the whole page build: fetch, assemble, render, write.
///
/// `build_timeout` bounds all of it, including the output writes.
pub async fn build_page(
    config: &BuildConfig,
    search: &dyn AssetSearch,
    placeholders: &dyn PlaceholderSource,
    delivery: &cloudinary::Config,
) -> Result<BuildReport> {
    let build = run_build(config, search, placeholders, delivery);
    match config.build_timeout {
        Some(limit) => tokio::time::timeout(limit, build)
            .await
            .map_err(|_| anyhow!("Page build timed out after {:?}", limit))?,
        None => build.await,
    }
}

async fn run_build(
    config: &BuildConfig,
    search: &dyn AssetSearch,
    placeholders: &dyn PlaceholderSource,
    delivery: &cloudinary::Config,
) -> Result<BuildReport> {
    let images =
        gallery::assemble(search, placeholders, &config.assembler).await?;

    let mut content = SiteContent::montreal_in_motion();
    if let Some(portrait) = &config.portrait {
        let path = portrait.to_string_lossy();
        let data_uri = image_utils::encode_file_as_data_uri(&path)
            .await
            .with_context(|| format!("Failed to inline portrait '{}'", path))?;
        content = content.with_portrait(data_uri);
    }

    let mut state = PageState::new(Capabilities {
        touch_screen: config.touch_screen,
    });
    state.set_layout(config.initial_layout);

    let renderer = PageRenderer::new(delivery.clone())?;
    let html = renderer.render(&images, &state, &content)?;
    let written = render::write_output(&config.out_dir, &html, &images).await?;

    info!(
        images = images.len(),
        path = %written.html_path.display(),
        "Wrote page"
    );

    Ok(BuildReport { images, written })
}
