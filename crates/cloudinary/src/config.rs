use anyhow::{anyhow, Result};

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    pub delivery_base: String,
}

impl Config {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
        }
    }

    /// Reads the Cloudinary credentials from the environment, falling back to
    /// a `.env` file in the working directory.
    ///
    /// `NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME` is accepted for the cloud name so an
    /// existing frontend `.env` can be reused as is.
    pub fn from_env() -> Result<Self> {
        let cloud_name = required_var("CLOUDINARY_CLOUD_NAME")
            .or_else(|_| required_var("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME"))?;

        Ok(Self {
            cloud_name,
            api_key: required_var("CLOUDINARY_API_KEY")?,
            api_secret: required_var("CLOUDINARY_API_SECRET")?,
            api_base: dotenv::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            delivery_base: dotenv::var("CLOUDINARY_DELIVERY_BASE")
                .unwrap_or_else(|_| DEFAULT_DELIVERY_BASE.to_string()),
        })
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/v1_1/{}/resources/search",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

fn required_var(name: &str) -> Result<String> {
    match dotenv::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("${} must be set", name)),
    }
}
