use serde::Serialize;
use std::collections::BTreeMap;

pub const SOCIAL_CLICK: &str = "Social Click";
pub const ABOUT_MODAL: &str = "About Modal";

/// An event for the client-side tracker.
///
/// Nothing is sent at build time. Events end up in the markup as
/// `data-track` and `data-track-<prop>` attributes on the element that
/// triggers them.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent {
    pub name: String,
    pub props: BTreeMap<String, String>,
}

impl TrackEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn social_click(location: &str) -> Self {
        Self::new(SOCIAL_CLICK).with_prop("location", location)
    }

    pub fn about_modal(location: &str) -> Self {
        Self::new(ABOUT_MODAL).with_prop("location", location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_click() {
        let event = TrackEvent::social_click("Instagram");
        assert_eq!(event.name, "Social Click");
        assert_eq!(event.props.get("location").map(String::as_str), Some("Instagram"));
    }

    #[test]
    fn test_serializes_props_as_map() {
        let event = TrackEvent::about_modal("Montreal in Motion");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({
                "name": "About Modal",
                "props": {"location": "Montreal in Motion"},
            })
        );
    }
}
