use indexmap::IndexMap;
use thiserror::Error;

use crate::models::content::LayoutContent;
use crate::models::layout::LayoutTag;

/// Returned when an edit targets a field the layout does not have.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("layout {layout} has no field named '{field}'")]
pub struct UnknownFieldError {
    pub layout: LayoutTag,
    pub field: String,
}

/// The values of an open edit form, one entry per editable field of the layout.
///
/// List fields (bullets, column content) are held as newline-separated text, the
/// way they appear in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    layout: LayoutTag,
    values: IndexMap<&'static str, String>,
}

/// Splits list text into entries: one per line, trimmed, blank lines dropped.
pub fn split_list_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl EditDraft {
    /// Pre-fills a draft from normalized content. Missing fields start empty.
    pub fn from_content(content: &LayoutContent) -> Self {
        let layout = content.layout();
        let values = layout
            .fields()
            .iter()
            .map(|field| {
                let value = if field.is_list() {
                    content
                        .list_field(field.name)
                        .map(|entries| entries.join("\n"))
                        .unwrap_or_default()
                } else {
                    content.text_field(field.name).unwrap_or_default().to_string()
                };
                (field.name, value)
            })
            .collect();
        Self { layout, values }
    }

    pub fn layout(&self) -> LayoutTag {
        self.layout
    }

    /// The current text of `field`, or `None` if the layout has no such field.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Field names and values in form order.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), UnknownFieldError> {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(UnknownFieldError {
                layout: self.layout,
                field: field.to_string(),
            }),
        }
    }

    /// Converts the form values into content. Every field is present afterwards;
    /// list fields are split with [`split_list_text`].
    pub fn into_content(self) -> LayoutContent {
        let mut content = LayoutContent::empty(self.layout);
        for (name, value) in self.values {
            if let Some(slot) = content.list_slot_mut(name) {
                *slot = Some(split_list_text(&value));
            } else if let Some(slot) = content.text_slot_mut(name) {
                *slot = Some(value);
            }
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{TitleAndBulletsContent, TwoColumnContent};

    #[test]
    fn split_trims_and_drops_blank_lines() {
        assert_eq!(
            split_list_text("  first \n\n second\r\n   \nthird"),
            vec!["first", "second", "third"]
        );
        assert!(split_list_text("\n \n").is_empty());
    }

    #[test]
    fn prefills_every_field_in_order() {
        let content = LayoutContent::TwoColumn(TwoColumnContent {
            title: Some("Compare".into()),
            column1_content: Some(vec!["a".into(), "b".into()]),
            ..Default::default()
        });
        let draft = EditDraft::from_content(&content);
        let values: Vec<(&str, &str)> = draft.values().collect();
        assert_eq!(
            values,
            vec![
                ("title", "Compare"),
                ("column1Title", ""),
                ("column1Content", "a\nb"),
                ("column2Title", ""),
                ("column2Content", ""),
            ]
        );
    }

    #[test]
    fn set_rejects_fields_of_other_layouts() {
        let mut draft = EditDraft::from_content(&LayoutContent::empty(LayoutTag::Quote));
        assert!(draft.set("author", "Ada").is_ok());
        let err = draft.set("title", "nope").unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.to_string(), "layout quote has no field named 'title'");
    }

    #[test]
    fn into_content_splits_list_fields() {
        let mut draft = EditDraft::from_content(&LayoutContent::empty(LayoutTag::TitleAndBullets));
        draft.set("title", "Plan").unwrap();
        draft.set("bullets", "one\n  two  \n\nthree\n").unwrap();
        assert_eq!(
            draft.into_content(),
            LayoutContent::TitleAndBullets(TitleAndBulletsContent {
                title: Some("Plan".into()),
                bullets: Some(vec!["one".into(), "two".into(), "three".into()]),
            })
        );
    }
}
