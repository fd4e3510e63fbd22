//! Slides and the elements placed on them.

mod flag;

pub use flag::{FlagKind, FlagStyle};

use crate::color::SerializableColor;
use crate::markup::TextAttributes;
use serde::{Deserialize, Serialize};

/// One element on a slide.
///
/// Text and lists flow downward from the content origin; rectangles and flags
/// are placed at absolute offsets from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A paragraph of text.
    Text {
        text: String,
        #[serde(default)]
        attributes: TextAttributes,
    },
    /// An ordered list; items are numbered from 1.
    EnumList {
        items: Vec<String>,
        #[serde(default)]
        attributes: TextAttributes,
    },
    /// A filled rectangle.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: SerializableColor,
    },
    /// A pole-and-flag annotation.
    Flag {
        x: f64,
        y: f64,
        pole_height: f64,
        #[serde(default)]
        style: FlagStyle,
    },
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text {
            text: text.into(),
            attributes: TextAttributes::new(),
        }
    }

    pub fn enum_list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Element::EnumList {
            items: items.into_iter().map(Into::into).collect(),
            attributes: TextAttributes::new(),
        }
    }

    /// List items paired with their order, starting at 1. Empty for other
    /// elements.
    pub fn ordered_items(&self) -> Vec<(usize, &str)> {
        match self {
            Element::EnumList { items, .. } => items
                .iter()
                .enumerate()
                .map(|(i, item)| (i + 1, item.as_str()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Slide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_items() {
        let list = Element::enum_list(["first", "second"]);
        assert_eq!(list.ordered_items(), vec![(1, "first"), (2, "second")]);
        assert!(Element::text("x").ordered_items().is_empty());
    }

    #[test]
    fn test_element_json_tags() {
        let element: Element = serde_json::from_str(
            r#"{"type": "rectangle", "x": 1, "y": 2, "width": 3, "height": 4, "color": "red"}"#,
        )
        .unwrap();
        assert_eq!(
            element,
            Element::Rectangle {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
                color: SerializableColor::red(),
            }
        );

        let flag: Element =
            serde_json::from_str(r#"{"type": "flag", "x": 0, "y": 0, "pole_height": 80}"#)
                .unwrap();
        assert!(matches!(flag, Element::Flag { pole_height, .. } if pole_height == 80.0));
    }
}
