//! Renders slides to HTML fragments for the editor preview and thumbnails.
//!
//! The entry points are [`render`] (raw layout tag and content) and
//! [`render_slide`] (a stored slide plus a template id). Both normalize the
//! content first, so renderers only ever see plain strings and lists.
//!
//! Lookup failures (an unknown layout or template) return an error before any
//! markup is produced; callers skip the slide instead of showing partial output.

mod constants;
mod error;
mod form;
mod layouts;
mod utils;

pub use error::{RenderError, Result};
pub use form::{render_edit_form, render_template_preview};
pub use layouts::{ColumnView, SlideView};
pub use utils::{escape_html, truncate};

use log::debug;
use serde_json::Value;

use crate::converters::normalize::normalize_content;
use crate::models::{
    content::LayoutContent,
    layout::LayoutTag,
    slide::Slide,
    template::{self, Template},
};

/// Resolves a template id, failing with [`RenderError::TemplateNotFound`].
pub fn resolve_template(template_id: &str) -> Result<&'static Template> {
    template::lookup(template_id)
        .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))
}

/// Builds the display view of raw content for a layout tag.
pub fn slide_view(layout: &str, content: &Value) -> Result<SlideView> {
    let layout: LayoutTag = layout.parse()?;
    Ok(SlideView::from_content(&normalize_content(layout, content)))
}

/// Renders normalized content with a template.
pub fn render_content(content: &LayoutContent, template: &Template) -> Result<String> {
    SlideView::from_content(content).write_html(template)
}

/// Renders raw, untrusted slide content. Pure: the output depends only on the inputs.
///
/// # Errors
/// [`RenderError::LayoutNotFound`] if `layout` is not a known tag.
pub fn render(layout: &str, content: &Value, template: &Template) -> Result<String> {
    debug!("Rendering layout '{}' with template '{}'", layout, template.id);
    slide_view(layout, content)?.write_html(template)
}

/// Renders a stored slide with the template identified by `template_id`.
pub fn render_slide(slide: &Slide, template_id: &str) -> Result<String> {
    let template = resolve_template(template_id)?;
    render(&slide.layout, &slide.content, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> &'static Template {
        template::lookup("minimal").unwrap()
    }

    #[test]
    fn placeholders_for_all_layouts_with_empty_content() {
        let cases = [
            ("titleAndBullets", vec!["Title", "No bullet points available"]),
            ("quote", vec!["Quote goes here", "Author"]),
            (
                "imageAndParagraph",
                vec!["Title", "Paragraph text", "Image description"],
            ),
            (
                "twoColumn",
                vec!["Title", "Column 1", "Column 2", "No content available"],
            ),
            ("titleOnly", vec!["Title", "Subtitle"]),
        ];
        for (layout, placeholders) in cases {
            let html = render(layout, &json!({}), minimal()).unwrap();
            for placeholder in placeholders {
                assert!(
                    html.contains(placeholder),
                    "{layout} markup should contain '{placeholder}'"
                );
            }
        }
    }

    #[test]
    fn generated_quote_renders_text_and_author() {
        let view = slide_view("quote", &json!({"quote": "Q", "author": "A"})).unwrap();
        assert_eq!(
            view,
            SlideView::Quote {
                quote: "Q".into(),
                attribution: "\u{2014} A".into(),
            }
        );
    }

    #[test]
    fn unknown_layout_is_reported() {
        let err = render("carousel", &json!({}), minimal()).unwrap_err();
        assert!(matches!(err, RenderError::LayoutNotFound(ref tag) if tag == "carousel"));
    }

    #[test]
    fn unknown_template_is_reported() {
        let slide = Slide::new(LayoutTag::TitleOnly, json!({"title": "x"}));
        let err = render_slide(&slide, "neon").unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(ref id) if id == "neon"));
    }

    #[test]
    fn rendering_does_not_mutate_content() {
        let content = json!({"bullets": ["b".repeat(150)], "title": "t".repeat(90)});
        let before = content.clone();
        let html = render("titleAndBullets", &content, minimal()).unwrap();
        assert_eq!(content, before);
        assert!(html.contains(&format!("{}...", "t".repeat(77))));
        assert!(html.contains(&format!("{}...", "b".repeat(97))));
    }

    #[test]
    fn render_is_deterministic() {
        let content = json!({"title": "Same", "subtitle": {"info": "every time"}});
        let first = render("titleOnly", &content, minimal()).unwrap();
        let second = render("titleOnly", &content, minimal()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("every time"));
    }
}
