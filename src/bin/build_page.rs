use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use montreal_in_motion::build::{self, BuildConfig};
use montreal_in_motion::gallery::{
    AssemblerOptions, PlaceholderPolicy, DEFAULT_CONCURRENCY, DEFAULT_FOLDER,
    DEFAULT_MAX_RESULTS,
};
use montreal_in_motion::page::LayoutMode;
use montreal_in_motion::placeholder::CloudinaryPlaceholders;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Builds the Montreal in Motion gallery page from the Cloudinary folder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Where index.html and images.json are written
    #[arg(long, default_value = build::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Cloudinary folder holding the photos
    #[arg(long, default_value = DEFAULT_FOLDER)]
    folder: String,

    /// The search API caps a single page at 500
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..=500)
    )]
    max_results: u32,

    /// Render the touch-screen variant (single face, bottom sheet)
    #[arg(long)]
    touch_screen: bool,

    #[arg(long, value_enum, default_value_t = LayoutMode::List)]
    layout: LayoutMode,

    /// What to do when a blur placeholder cannot be produced
    #[arg(long, value_enum, default_value_t = PlaceholderPolicy::Fallback)]
    placeholder_policy: PlaceholderPolicy,

    /// How many placeholders to fetch at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per placeholder, 0 disables the limit
    #[arg(long, default_value_t = 10)]
    placeholder_timeout_secs: u64,

    /// Whole build, 0 disables the limit
    #[arg(long, default_value_t = 120)]
    build_timeout_secs: u64,

    /// Local image to inline as the portrait in the about overlay
    #[arg(long)]
    portrait: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> BuildConfig {
        BuildConfig {
            assembler: AssemblerOptions {
                folder: self.folder,
                max_results: self.max_results,
                policy: self.placeholder_policy,
                concurrency: self.concurrency,
                placeholder_timeout: seconds(self.placeholder_timeout_secs),
            },
            out_dir: self.out_dir,
            touch_screen: self.touch_screen,
            initial_layout: self.layout,
            build_timeout: seconds(self.build_timeout_secs),
            portrait: self.portrait,
        }
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("build_page=info,montreal_in_motion=info,cloudinary=info")
            }),
        )
        .with_target(false)
        .finish()
        .init();

    dotenv::dotenv().ok();

    let config = Args::parse().into_config();
    let cloudinary_config = cloudinary::Config::from_env()?;

    info!(
        folder = %config.assembler.folder,
        cloud = %cloudinary_config.cloud_name,
        "Building page"
    );

    let search = cloudinary::Client::new(cloudinary_config.clone());
    let placeholders = CloudinaryPlaceholders::new(cloudinary_config.clone());

    let report =
        build::build_page(&config, &search, &placeholders, &cloudinary_config)
            .await?;

    println!(
        "{} {} images -> {}",
        "Built".green().bold(),
        report.images.len().to_string().cyan(),
        report.written.html_path.display().to_string().yellow()
    );

    Ok(())
}
