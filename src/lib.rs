pub mod analytics;
pub mod build;
pub mod content;
pub mod gallery;
pub mod page;
pub mod placeholder;
pub mod render;

pub use build::{build_page, BuildConfig, BuildReport};
pub use gallery::{assemble, AssemblerOptions, ImageRecord, PlaceholderPolicy};
