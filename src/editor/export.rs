use log::warn;

use crate::models::api::ExportSlide;
use crate::models::slide::Slide;

/// A finished export, ready to be offered as a client-side download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Lower-cases `topic` and replaces every character outside `[a-z0-9]` with `_`.
pub fn slugify(topic: &str) -> String {
    topic
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `<slug>_presentation.<extension>`
pub fn download_file_name(topic: &str, extension: &str) -> String {
    format!("{}_presentation.{}", slugify(topic), extension)
}

/// Normalizes slides into the plain shapes the export endpoint expects, with
/// placeholders for missing fields. Slides with an unknown layout are skipped.
pub fn export_slides(slides: &[Slide]) -> Vec<ExportSlide> {
    slides
        .iter()
        .enumerate()
        .filter_map(|(index, slide)| match slide.normalized() {
            Ok(content) => Some(ExportSlide {
                layout: content.layout(),
                content: content.with_placeholders(),
            }),
            Err(e) => {
                warn!("Skipping slide {} in export: {}", index + 1, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::LayoutTag;
    use serde_json::json;

    #[test]
    fn slugify_replaces_everything_outside_lowercase_alphanumerics() {
        assert_eq!(slugify("Rust & WebAssembly 2024!"), "rust___webassembly_2024_");
        assert_eq!(slugify("Café"), "caf_");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn astral_characters_slug_to_one_underscore() {
        assert_eq!(slugify("Rust \u{1F980}"), "rust__");
    }

    #[test]
    fn file_name_uses_slug_and_extension() {
        assert_eq!(
            download_file_name("Climate Change", "pptx"),
            "climate_change_presentation.pptx"
        );
    }

    #[test]
    fn export_coerces_arrays_and_fills_placeholders() {
        let slides = vec![
            Slide::new(
                LayoutTag::TitleAndBullets,
                json!({"title": "Intro", "bullets": [{"text": "a"}, 2, "c"]}),
            ),
            Slide {
                layout: "mystery".into(),
                content: json!({}),
            },
            Slide::new(LayoutTag::Quote, json!({"quote": "Q"})),
        ];
        let exported = export_slides(&slides);
        assert_eq!(exported.len(), 2);
        assert_eq!(
            serde_json::to_value(&exported).unwrap(),
            json!([
                {"layout": "titleAndBullets", "content": {"title": "Intro", "bullets": ["a", "2", "c"]}},
                {"layout": "quote", "content": {"quote": "Q", "author": "Author"}}
            ])
        );
    }
}
