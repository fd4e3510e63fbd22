//! Span markup used to hand styled text to a surface for measuring.
//!
//! Text is wrapped as `<span key='value' ...>text</span>`. Attribute values and
//! the text body are XML-escaped, so a span always parses back to the same
//! text and attributes.

use crate::error::{CoreError, CoreResult};
use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

/// Text style attributes, keyed by attribute name (`size`, `foreground`,
/// `weight`, `font_family`).
pub type TextAttributes = BTreeMap<String, String>;

/// Render attributes as `key='value'` pairs.
///
/// An empty value means "unset" and is skipped rather than written as `key=''`.
pub fn to_attrs(attributes: &TextAttributes) -> String {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}='{}'", escape(key.as_str()), escape(value.as_str())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap `text` in a span carrying `attributes`.
///
/// The text is escaped; inline markup inside it is not supported.
pub fn span_markup(text: &str, attributes: &TextAttributes) -> String {
    let attrs = to_attrs(attributes);
    if attrs.is_empty() {
        format!("<span>{}</span>", escape(text))
    } else {
        format!("<span {}>{}</span>", attrs, escape(text))
    }
}

/// Parsed markup: plain text plus the span's attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub text: String,
    pub attributes: TextAttributes,
}

fn markup_error(markup: &str, reason: impl std::fmt::Display) -> CoreError {
    CoreError::Markup(format!("{reason} in {markup:?}"))
}

fn read_attributes(markup: &str, tag: &BytesStart) -> CoreResult<TextAttributes> {
    let mut attributes = TextAttributes::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| markup_error(markup, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map_err(|e| markup_error(markup, e))?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

impl Markup {
    /// Parse a single span, or plain text without any tags.
    pub fn parse(markup: &str) -> CoreResult<Self> {
        let mut reader = Reader::from_str(markup);
        let mut buf = Vec::new();
        // escaped text, unescaped once at the end
        let mut raw = String::new();
        let mut attributes = TextAttributes::new();
        let mut in_span = false;
        let mut closed = false;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| markup_error(markup, e))?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if e.name().as_ref() != b"span" {
                        return Err(markup_error(markup, "unknown tag"));
                    }
                    if in_span || closed || !raw.is_empty() {
                        return Err(markup_error(markup, "nested or repeated span"));
                    }
                    attributes = read_attributes(markup, e)?;
                    in_span = matches!(event, Event::Start(_));
                    closed = !in_span;
                }
                Event::End(_) => {
                    if !in_span {
                        return Err(markup_error(markup, "unexpected end tag"));
                    }
                    in_span = false;
                    closed = true;
                }
                Event::Text(ref t) => {
                    if closed {
                        return Err(markup_error(markup, "text after </span>"));
                    }
                    raw.push_str(&String::from_utf8_lossy(t));
                }
                Event::GeneralRef(ref r) => {
                    if closed {
                        return Err(markup_error(markup, "text after </span>"));
                    }
                    raw.push('&');
                    raw.push_str(&String::from_utf8_lossy(r));
                    raw.push(';');
                }
                Event::Eof => break,
                _ => return Err(markup_error(markup, "unsupported markup")),
            }
            buf.clear();
        }

        if in_span {
            return Err(markup_error(markup, "missing </span>"));
        }
        let text = unescape(&raw).map_err(|e| markup_error(markup, e))?.into_owned();
        Ok(Self { text, attributes })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> TextAttributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_to_attrs_skips_empty_values() {
        let attributes = attrs(&[("size", "24"), ("weight", ""), ("foreground", "red")]);
        assert_eq!(to_attrs(&attributes), "foreground='red' size='24'");
    }

    #[test]
    fn test_span_markup_escapes_text() {
        let markup = span_markup("a < b & c", &attrs(&[("size", "12")]));
        assert_eq!(markup, "<span size='12'>a &lt; b &amp; c</span>");
    }

    #[test]
    fn test_parse_span() {
        let markup =
            Markup::parse("<span size='30' foreground=\"#ff0000\">Hi &amp; bye</span>").unwrap();
        assert_eq!(markup.text, "Hi & bye");
        assert_eq!(markup.attribute("size"), Some("30"));
        assert_eq!(markup.attribute("foreground"), Some("#ff0000"));
    }

    #[test]
    fn test_parse_plain_text() {
        let markup = Markup::parse("just text").unwrap();
        assert_eq!(markup.text, "just text");
        assert!(markup.attributes.is_empty());
    }

    #[test]
    fn test_parse_built_span() {
        let attributes = attrs(&[("font_family", "Noto 'Sans'"), ("size", "18")]);
        let markup = Markup::parse(&span_markup("x > y", &attributes)).unwrap();
        assert_eq!(markup.text, "x > y");
        assert_eq!(markup.attributes, attributes);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Markup::parse("<b>bold</b>").is_err());
        assert!(Markup::parse("<span size='1'>open").is_err());
        assert!(Markup::parse("<span size=1>x</span>").is_err());
        assert!(Markup::parse("<span size='1>x</span>").is_err());
        assert!(Markup::parse("<span><span>x</span></span>").is_err());
        assert!(Markup::parse("<span>x</span> tail").is_err());
    }

    #[test]
    fn test_parse_multiline_and_entities() {
        let markup =
            Markup::parse("<span weight='bold'>one &lt;1&gt;\ntwo &apos;2&apos;</span>").unwrap();
        assert_eq!(markup.text, "one <1>\ntwo '2'");
        assert_eq!(markup.attribute("weight"), Some("bold"));
    }

    #[test]
    fn test_parse_empty_span() {
        let markup = Markup::parse("<span size='9'></span>").unwrap();
        assert_eq!(markup.text, "");
        assert_eq!(markup.attribute("size"), Some("9"));
    }

    #[test]
    fn test_span_markup_does_not_nest() {
        let markup = span_markup("<b>bold</b>", &TextAttributes::new());
        assert_eq!(markup, "<span>&lt;b&gt;bold&lt;/b&gt;</span>");
        assert_eq!(Markup::parse(&markup).unwrap().text, "<b>bold</b>");
    }
}
