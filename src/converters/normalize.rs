//! Coerces loosely-typed generated slide content into plain strings and lists.
//!
//! The generation backend does not guarantee a content shape: a bullet can arrive as
//! `"text"`, `{"text": ...}`, `{"bulletPoint": ...}`, `{"info": ...}` or an object
//! with some other key. Everything that reads slide content goes through this module.

use log::{debug, warn};
use serde_json::{Map, Number, Value};

use crate::models::content::{
    ImageAndParagraphContent, LayoutContent, QuoteContent, TitleAndBulletsContent,
    TitleOnlyContent, TwoColumnContent,
};
use crate::models::layout::LayoutTag;

/// Object keys that carry an item's text, in order of preference.
const TEXT_KEYS: [&str; 3] = ["text", "bulletPoint", "info"];

/// Mirrors the truthiness the generated content was written against: null, `false`,
/// `0`, and `""` count as "no value".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Formats a number the way generated content expects to read it: integral floats
/// print without a fractional part (`3`, not `3.0`).
fn number_text(number: &Number) -> String {
    if number.is_f64() {
        if let Some(f) = number.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{:.0}", f);
            }
        }
    }
    number.to_string()
}

fn object_text(map: &Map<String, Value>) -> String {
    for key in TEXT_KEYS {
        if let Some(value) = map.get(key).filter(|v| is_truthy(v)) {
            return item_text(value);
        }
    }

    // Legacy fallback: the first own key in insertion order. Depends on the
    // `preserve_order` feature of serde_json.
    match map.iter().next() {
        Some((key, value)) if is_truthy(value) => {
            debug!("Content object has no text key, falling back to first key '{}'", key);
            item_text(value)
        }
        _ => String::new(),
    }
}

/// Normalizes a single content item of unknown shape into a display string.
///
/// * strings are returned as-is,
/// * null becomes the empty string,
/// * objects yield their `text`, `bulletPoint` or `info` value, else the value of
///   their first key, else the empty string,
/// * anything else uses its canonical string form.
///
/// Never produces an object placeholder such as `[object Object]` or raw JSON.
pub fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => object_text(map),
        Value::Array(items) => items.iter().map(item_text).collect::<Vec<_>>().join(","),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
    }
}

/// Normalizes a list-like field (array, string or object) into an ordered list of strings.
/// Returns `None` when the field is absent or holds no value.
pub fn item_list_opt(value: Option<&Value>) -> Option<Vec<String>> {
    let value = value.filter(|v| is_truthy(v))?;
    match value {
        Value::Array(items) => Some(items.iter().map(item_text).collect()),
        other => Some(vec![item_text(other)]),
    }
}

/// Like [`item_list_opt`], substituting a single `placeholder` entry for a missing field.
pub fn item_list(value: Option<&Value>, placeholder: &str) -> Vec<String> {
    item_list_opt(value).unwrap_or_else(|| vec![placeholder.to_string()])
}

/// Reads a single-string field. Empty results count as missing.
fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .filter(|v| is_truthy(v))
        .map(item_text)
        .filter(|text| !text.is_empty())
}

fn field_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    item_list_opt(map.get(key))
}

/// Normalizes raw slide content into the strict shape of `layout`.
///
/// Content that is not a JSON object is treated as having no fields.
pub fn normalize_content(layout: LayoutTag, content: &Value) -> LayoutContent {
    let empty = Map::new();
    let map = match content {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            warn!(
                "Ignoring non-object content for layout {}: {}",
                layout,
                type_name(other)
            );
            &empty
        }
    };

    match layout {
        LayoutTag::TitleAndBullets => LayoutContent::TitleAndBullets(TitleAndBulletsContent {
            title: field_text(map, "title"),
            bullets: field_list(map, "bullets"),
        }),
        LayoutTag::Quote => LayoutContent::Quote(QuoteContent {
            quote: field_text(map, "quote"),
            author: field_text(map, "author"),
        }),
        LayoutTag::ImageAndParagraph => LayoutContent::ImageAndParagraph(ImageAndParagraphContent {
            title: field_text(map, "title"),
            paragraph: field_text(map, "paragraph"),
            image_description: field_text(map, "imageDescription"),
        }),
        LayoutTag::TwoColumn => LayoutContent::TwoColumn(TwoColumnContent {
            title: field_text(map, "title"),
            column1_title: field_text(map, "column1Title"),
            column1_content: field_list(map, "column1Content"),
            column2_title: field_text(map, "column2Title"),
            column2_content: field_list(map, "column2Content"),
        }),
        LayoutTag::TitleOnly => LayoutContent::TitleOnly(TitleOnlyContent {
            title: field_text(map, "title"),
            subtitle: field_text(map, "subtitle"),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
