use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Body of a `resources/search` call.
///
/// Built the same way the Cloudinary SDKs do it:
///
/// ```
/// use cloudinary::models::{SearchRequest, SortDirection};
///
/// let request = SearchRequest::new()
///     .expression("folder:metroo/*")
///     .with_field("context")
///     .sort_by("public_id", SortDirection::Desc)
///     .max_results(400);
/// assert_eq!(request.max_results, Some(400));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub with_field: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sort_by: Vec<HashMap<String, SortDirection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.with_field.contains(&field) {
            self.with_field.push(field);
        }
        self
    }

    pub fn sort_by(
        mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        self.sort_by.push(HashMap::from([(field.into(), direction)]));
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub total_count: u64,
    /// Set when the folder holds more assets than `max_results` returned.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Resource {
    pub public_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl Resource {
    /// Looks up a string in the asset's metadata context.
    ///
    /// The search API returns context flattened (`{"alt": ".."}`) while the
    /// admin API nests it under `custom`, so both are checked.
    pub fn context_str(&self, key: &str) -> Option<&str> {
        let context = self.context.as_ref()?;
        if let Some(value) = context.get(key).and_then(|v| v.as_str()) {
            return Some(value);
        }
        context
            .get("custom")
            .and_then(|custom| custom.get(key))
            .and_then(|v| v.as_str())
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ErrorMessage {
    pub message: String,
}
