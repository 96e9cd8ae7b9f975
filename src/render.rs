use crate::content::SiteContent;
use crate::gallery::ImageRecord;
use crate::page::PageState;
use anyhow::{Context, Result};
use minijinja::{context, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::create_dir_all;

pub const PAGE_TEMPLATE: &str = "page.html";
pub const DISPLAY_TRANSFORMATION: &str = "q_auto,c_scale,w_1080";

/// An image as the template sees it: the record plus its delivery URL.
#[derive(Serialize, Debug)]
struct GalleryItem<'a> {
    id: usize,
    src: String,
    alt: &'a str,
    title: &'a str,
    width: u32,
    height: u32,
    blur_data_url: &'a str,
}

pub struct PageRenderer {
    env: Environment<'static>,
    delivery: cloudinary::Config,
}

impl PageRenderer {
    pub fn new(delivery: cloudinary::Config) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(
            PAGE_TEMPLATE,
            include_str!("../templates/page.html"),
        )
        .context("Failed to load page template")?;

        Ok(Self { env, delivery })
    }

    pub fn image_src(&self, record: &ImageRecord) -> String {
        cloudinary::delivery_url(
            &self.delivery,
            &record.public_id,
            &record.format,
            DISPLAY_TRANSFORMATION,
        )
    }

    pub fn render(
        &self,
        images: &[ImageRecord],
        state: &PageState,
        content: &SiteContent,
    ) -> Result<String> {
        let items: Vec<GalleryItem> = images
            .iter()
            .map(|record| GalleryItem {
                id: record.id,
                src: self.image_src(record),
                alt: &record.alt,
                title: &record.title,
                width: record.width,
                height: record.height,
                blur_data_url: &record.blur_data_url,
            })
            .collect();

        // Rendering must not change the page state, so the event comes from
        // a scratch copy.
        let about_event = state.clone().open_dialog();
        let layout = state.layout();

        let ctx = context! {
            seo => &content.seo,
            content,
            items,
            faces => state.faces(),
            overlay => state.overlay(),
            dialog_open => state.dialog_open(),
            layout,
            grid_classes => layout.grid_classes(),
            about_event,
        };

        let tmpl = self
            .env
            .get_template(PAGE_TEMPLATE)
            .context("Missing page template")?;

        tmpl.render(ctx).context("Failed to render page")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPage {
    pub html_path: PathBuf,
    pub json_path: PathBuf,
}

/// Writes `index.html` and `images.json` into `out_dir`, creating it if
/// needed.
pub async fn write_output(
    out_dir: &Path,
    html: &str,
    images: &[ImageRecord],
) -> Result<WrittenPage> {
    create_dir_all(out_dir).await.with_context(|| {
        format!("Failed to create directory '{}'", out_dir.display())
    })?;

    let html_path = out_dir.join("index.html");
    tokio::fs::write(&html_path, html).await.with_context(|| {
        format!("Error writing to file: {}", html_path.display())
    })?;

    let json = serde_json::to_vec_pretty(&serde_json::json!({ "images": images }))
        .context("Failed to serialize image records")?;
    let json_path = out_dir.join("images.json");
    tokio::fs::write(&json_path, json).await.with_context(|| {
        format!("Error writing to file: {}", json_path.display())
    })?;

    Ok(WrittenPage {
        html_path,
        json_path,
    })
}
