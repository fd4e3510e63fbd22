//! Slide source documents.

use crate::error::CoreResult;
use crate::slides::Slide;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// The raw source of a presentation, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDocument {
    /// Unique document identifier.
    #[serde(default = "new_id")]
    pub id: String,
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Theme requested by the document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Default for SlideDocument {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl SlideDocument {
    /// Create a new empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            theme: None,
            slides: Vec::new(),
        }
    }

    pub fn with_slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON. An empty or whitespace-only source is an empty
    /// document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::Element;

    #[test]
    fn test_from_json() {
        let doc = SlideDocument::from_json(
            r#"{
                "title": "Talk",
                "theme": "night",
                "slides": [
                    {"title": "Intro", "elements": [{"type": "text", "text": "hello"}]},
                    {"title": "Outro"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.title, "Talk");
        assert_eq!(doc.theme.as_deref(), Some("night"));
        assert_eq!(doc.slides.len(), 2);
        assert_eq!(doc.slides[0].elements, vec![Element::text("hello")]);
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn test_empty_source() {
        let doc = SlideDocument::from_json("  \n").unwrap();
        assert!(doc.slides.is_empty());
    }

    #[test]
    fn test_malformed_source() {
        assert!(SlideDocument::from_json("{\"slides\": 3}").is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_slides() {
        let doc = SlideDocument::new("T")
            .with_slide(Slide::new("a").with_element(Element::enum_list(["x", "y"])));
        let parsed = SlideDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }
}
