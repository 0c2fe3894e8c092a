//! Strict, normalized slide content: one struct per layout.
//!
//! A `None` field means the generated content did not provide a usable value;
//! renderers substitute the matching text from [`placeholders`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::layout::LayoutTag;

/// Fallback texts shown when a field is missing.
pub mod placeholders {
    pub const TITLE: &str = "Title";
    pub const SUBTITLE: &str = "Subtitle";
    pub const BULLETS: &str = "No bullet points available";
    pub const QUOTE: &str = "Quote goes here";
    pub const AUTHOR: &str = "Author";
    pub const PARAGRAPH: &str = "Paragraph text";
    pub const IMAGE_DESCRIPTION: &str = "Image description";
    pub const COLUMN_1_TITLE: &str = "Column 1";
    pub const COLUMN_2_TITLE: &str = "Column 2";
    pub const COLUMN_CONTENT: &str = "No content available";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleAndBulletsContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAndParagraphContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoColumnContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "column1Title", skip_serializing_if = "Option::is_none")]
    pub column1_title: Option<String>,
    #[serde(rename = "column1Content", skip_serializing_if = "Option::is_none")]
    pub column1_content: Option<Vec<String>>,
    #[serde(rename = "column2Title", skip_serializing_if = "Option::is_none")]
    pub column2_title: Option<String>,
    #[serde(rename = "column2Content", skip_serializing_if = "Option::is_none")]
    pub column2_content: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOnlyContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// Normalized content of one slide, tagged by layout.
/// Serializes untagged: only the plain content fields appear in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LayoutContent {
    TitleAndBullets(TitleAndBulletsContent),
    Quote(QuoteContent),
    ImageAndParagraph(ImageAndParagraphContent),
    TwoColumn(TwoColumnContent),
    TitleOnly(TitleOnlyContent),
}

impl LayoutContent {
    /// Empty content (every field missing) for `layout`.
    pub fn empty(layout: LayoutTag) -> Self {
        match layout {
            LayoutTag::TitleAndBullets => Self::TitleAndBullets(Default::default()),
            LayoutTag::Quote => Self::Quote(Default::default()),
            LayoutTag::ImageAndParagraph => Self::ImageAndParagraph(Default::default()),
            LayoutTag::TwoColumn => Self::TwoColumn(Default::default()),
            LayoutTag::TitleOnly => Self::TitleOnly(Default::default()),
        }
    }

    pub fn layout(&self) -> LayoutTag {
        match self {
            Self::TitleAndBullets(_) => LayoutTag::TitleAndBullets,
            Self::Quote(_) => LayoutTag::Quote,
            Self::ImageAndParagraph(_) => LayoutTag::ImageAndParagraph,
            Self::TwoColumn(_) => LayoutTag::TwoColumn,
            Self::TitleOnly(_) => LayoutTag::TitleOnly,
        }
    }

    /// Returns the text of a single-string field by its content key.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        let field = match (self, name) {
            (Self::TitleAndBullets(c), "title") => &c.title,
            (Self::Quote(c), "quote") => &c.quote,
            (Self::Quote(c), "author") => &c.author,
            (Self::ImageAndParagraph(c), "title") => &c.title,
            (Self::ImageAndParagraph(c), "paragraph") => &c.paragraph,
            (Self::ImageAndParagraph(c), "imageDescription") => &c.image_description,
            (Self::TwoColumn(c), "title") => &c.title,
            (Self::TwoColumn(c), "column1Title") => &c.column1_title,
            (Self::TwoColumn(c), "column2Title") => &c.column2_title,
            (Self::TitleOnly(c), "title") => &c.title,
            (Self::TitleOnly(c), "subtitle") => &c.subtitle,
            _ => return None,
        };
        field.as_deref()
    }

    /// Returns the entries of a list field by its content key.
    pub fn list_field(&self, name: &str) -> Option<&[String]> {
        let field = match (self, name) {
            (Self::TitleAndBullets(c), "bullets") => &c.bullets,
            (Self::TwoColumn(c), "column1Content") => &c.column1_content,
            (Self::TwoColumn(c), "column2Content") => &c.column2_content,
            _ => return None,
        };
        field.as_deref()
    }

    pub(crate) fn text_slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match (self, name) {
            (Self::TitleAndBullets(c), "title") => &mut c.title,
            (Self::Quote(c), "quote") => &mut c.quote,
            (Self::Quote(c), "author") => &mut c.author,
            (Self::ImageAndParagraph(c), "title") => &mut c.title,
            (Self::ImageAndParagraph(c), "paragraph") => &mut c.paragraph,
            (Self::ImageAndParagraph(c), "imageDescription") => &mut c.image_description,
            (Self::TwoColumn(c), "title") => &mut c.title,
            (Self::TwoColumn(c), "column1Title") => &mut c.column1_title,
            (Self::TwoColumn(c), "column2Title") => &mut c.column2_title,
            (Self::TitleOnly(c), "title") => &mut c.title,
            (Self::TitleOnly(c), "subtitle") => &mut c.subtitle,
            _ => return None,
        };
        Some(slot)
    }

    pub(crate) fn list_slot_mut(&mut self, name: &str) -> Option<&mut Option<Vec<String>>> {
        let slot = match (self, name) {
            (Self::TitleAndBullets(c), "bullets") => &mut c.bullets,
            (Self::TwoColumn(c), "column1Content") => &mut c.column1_content,
            (Self::TwoColumn(c), "column2Content") => &mut c.column2_content,
            _ => return None,
        };
        Some(slot)
    }

    /// Fills every missing field with its placeholder text.
    pub fn with_placeholders(self) -> Self {
        fn text(value: Option<String>, fallback: &str) -> Option<String> {
            value.or_else(|| Some(fallback.to_string()))
        }
        fn list(value: Option<Vec<String>>, fallback: &str) -> Option<Vec<String>> {
            value.or_else(|| Some(vec![fallback.to_string()]))
        }

        match self {
            Self::TitleAndBullets(c) => Self::TitleAndBullets(TitleAndBulletsContent {
                title: text(c.title, placeholders::TITLE),
                bullets: list(c.bullets, placeholders::BULLETS),
            }),
            Self::Quote(c) => Self::Quote(QuoteContent {
                quote: text(c.quote, placeholders::QUOTE),
                author: text(c.author, placeholders::AUTHOR),
            }),
            Self::ImageAndParagraph(c) => Self::ImageAndParagraph(ImageAndParagraphContent {
                title: text(c.title, placeholders::TITLE),
                paragraph: text(c.paragraph, placeholders::PARAGRAPH),
                image_description: text(c.image_description, placeholders::IMAGE_DESCRIPTION),
            }),
            Self::TwoColumn(c) => Self::TwoColumn(TwoColumnContent {
                title: text(c.title, placeholders::TITLE),
                column1_title: text(c.column1_title, placeholders::COLUMN_1_TITLE),
                column1_content: list(c.column1_content, placeholders::COLUMN_CONTENT),
                column2_title: text(c.column2_title, placeholders::COLUMN_2_TITLE),
                column2_content: list(c.column2_content, placeholders::COLUMN_CONTENT),
            }),
            Self::TitleOnly(c) => Self::TitleOnly(TitleOnlyContent {
                title: text(c.title, placeholders::TITLE),
                subtitle: text(c.subtitle, placeholders::SUBTITLE),
            }),
        }
    }

    /// Converts the content into the plain JSON object stored on a slide.
    /// Missing fields are left out; lists become arrays of strings.
    pub fn into_value(self) -> Value {
        let layout = self.layout();
        let mut map = Map::new();
        for field in layout.fields() {
            if field.is_list() {
                if let Some(entries) = self.list_field(field.name) {
                    let items = entries.iter().cloned().map(Value::String).collect();
                    map.insert(field.name.to_string(), Value::Array(items));
                }
            } else if let Some(text) = self.text_field(field.name) {
                map.insert(field.name.to_string(), Value::String(text.to_string()));
            }
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_value_keeps_field_order_and_skips_missing() {
        let content = LayoutContent::TwoColumn(TwoColumnContent {
            title: Some("Pros and cons".into()),
            column1_title: None,
            column1_content: Some(vec!["fast".into(), "safe".into()]),
            column2_title: Some("Cons".into()),
            column2_content: Some(vec![]),
        });
        let value = content.into_value();
        assert_eq!(
            value,
            json!({
                "title": "Pros and cons",
                "column1Content": ["fast", "safe"],
                "column2Title": "Cons",
                "column2Content": []
            })
        );
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["title", "column1Content", "column2Title", "column2Content"]);
    }

    #[test]
    fn with_placeholders_fills_every_missing_field() {
        let filled = LayoutContent::empty(LayoutTag::TwoColumn).with_placeholders();
        assert_eq!(filled.text_field("title"), Some("Title"));
        assert_eq!(filled.text_field("column1Title"), Some("Column 1"));
        assert_eq!(filled.text_field("column2Title"), Some("Column 2"));
        assert_eq!(
            filled.list_field("column2Content"),
            Some(&["No content available".to_string()][..])
        );
    }

    #[test]
    fn with_placeholders_keeps_present_values() {
        let content = LayoutContent::Quote(QuoteContent {
            quote: Some("Q".into()),
            author: None,
        });
        let filled = content.with_placeholders();
        assert_eq!(filled.text_field("quote"), Some("Q"));
        assert_eq!(filled.text_field("author"), Some("Author"));
    }

    #[test]
    fn serializes_untagged_with_wire_keys() {
        let content = LayoutContent::ImageAndParagraph(ImageAndParagraphContent {
            title: Some("T".into()),
            paragraph: None,
            image_description: Some("A lighthouse".into()),
        });
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({"title": "T", "imageDescription": "A lighthouse"})
        );
    }
}
