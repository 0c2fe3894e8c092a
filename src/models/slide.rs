use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::converters::normalize::normalize_content;
use crate::models::content::LayoutContent;
use crate::models::layout::{LayoutTag, ParseLayoutError};

/// One slide as produced by the generation backend.
///
/// `content` is kept exactly as received. Its shape is only nominally determined by
/// `layout`: generated content may hold strings, arrays of strings, arrays of objects
/// with varying keys, or bare objects. Use [`Slide::normalized`] before reading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// The layout tag. Kept as a string so unknown layouts survive a save round-trip
    /// and are reported at render time instead of failing deserialization.
    pub layout: String,

    #[serde(default)]
    pub content: Value,
}

impl Slide {
    pub fn new(layout: LayoutTag, content: Value) -> Self {
        Self {
            layout: layout.id().to_string(),
            content,
        }
    }

    pub fn layout_tag(&self) -> Result<LayoutTag, ParseLayoutError> {
        self.layout.parse()
    }

    /// Parses the layout and normalizes the content into its strict shape.
    pub fn normalized(&self) -> Result<LayoutContent, ParseLayoutError> {
        let layout = self.layout_tag()?;
        Ok(normalize_content(layout, &self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_missing_content() {
        let slide: Slide = serde_json::from_value(json!({"layout": "quote"})).unwrap();
        assert_eq!(slide.content, Value::Null);
        assert_eq!(slide.layout_tag(), Ok(LayoutTag::Quote));
    }

    #[test]
    fn normalized_reports_unknown_layout() {
        let slide = Slide {
            layout: "hero".into(),
            content: json!({"title": "x"}),
        };
        assert_eq!(slide.normalized(), Err(ParseLayoutError("hero".into())));
    }

    #[test]
    fn normalized_reads_content_for_its_layout() {
        let slide = Slide::new(LayoutTag::TitleOnly, json!({"title": {"text": "Rust"}}));
        let content = slide.normalized().unwrap();
        assert_eq!(content.text_field("title"), Some("Rust"));
        assert_eq!(content.text_field("subtitle"), None);
    }
}
