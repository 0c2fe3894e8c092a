//! Per-layout view building and HTML serialization.
//!
//! Rendering happens in two steps. [`SlideView::from_content`] resolves placeholders
//! and truncation into display strings. [`SlideView::write_html`] lays those strings
//! out with the template's colors and font.

use log::debug;
use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    utils::{escape_html, truncate},
};
use crate::models::{
    content::{placeholders, LayoutContent},
    layout::LayoutTag,
    template::Template,
};

/// One titled column of a two-column slide, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub title: String,
    pub entries: Vec<String>,
}

/// The display strings of one slide after placeholders and truncation are applied.
/// Strings are unescaped; escaping happens when writing markup.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideView {
    TitleAndBullets {
        title: String,
        bullets: Vec<String>,
    },
    Quote {
        quote: String,
        /// The author line, e.g. `"— Grace Hopper"`.
        attribution: String,
    },
    ImageAndParagraph {
        title: String,
        paragraph: String,
        image_description: String,
        image_prompt: String,
    },
    TwoColumn {
        title: String,
        columns: [ColumnView; 2],
    },
    TitleOnly {
        title: String,
        subtitle: String,
    },
}

fn shown(value: &Option<String>, placeholder: &str, limit: usize) -> String {
    truncate(value.as_deref().unwrap_or(placeholder), limit)
}

fn column(title: &Option<String>, fallback_title: &str, entries: &Option<Vec<String>>) -> ColumnView {
    let entries = match entries {
        Some(entries) => entries.iter().map(|e| truncate(e, BULLET_LIMIT)).collect(),
        None => vec![placeholders::COLUMN_CONTENT.to_string()],
    };
    ColumnView {
        title: shown(title, fallback_title, COLUMN_TITLE_LIMIT),
        entries,
    }
}

impl SlideView {
    /// Builds the display view of normalized content.
    pub fn from_content(content: &LayoutContent) -> Self {
        match content {
            LayoutContent::TitleAndBullets(c) => {
                let mut bullets: Vec<String> = c
                    .bullets
                    .iter()
                    .flatten()
                    .take(MAX_BULLETS)
                    .map(|bullet| truncate(bullet, BULLET_LIMIT))
                    .collect();
                if bullets.is_empty() {
                    bullets.push(placeholders::BULLETS.to_string());
                }
                SlideView::TitleAndBullets {
                    title: shown(&c.title, placeholders::TITLE, TITLE_LIMIT),
                    bullets,
                }
            }
            LayoutContent::Quote(c) => SlideView::Quote {
                quote: shown(&c.quote, placeholders::QUOTE, QUOTE_LIMIT),
                attribution: format!(
                    "{}{}",
                    AUTHOR_PREFIX,
                    shown(&c.author, placeholders::AUTHOR, AUTHOR_LIMIT)
                ),
            },
            LayoutContent::ImageAndParagraph(c) => {
                let image_description = shown(
                    &c.image_description,
                    placeholders::IMAGE_DESCRIPTION,
                    IMAGE_DESCRIPTION_LIMIT,
                );
                SlideView::ImageAndParagraph {
                    title: shown(&c.title, placeholders::TITLE, TITLE_LIMIT),
                    paragraph: shown(&c.paragraph, placeholders::PARAGRAPH, PARAGRAPH_LIMIT),
                    image_prompt: format!("{}{}", IMAGE_PROMPT_PREFIX, image_description),
                    image_description,
                }
            }
            LayoutContent::TwoColumn(c) => SlideView::TwoColumn {
                title: shown(&c.title, placeholders::TITLE, TITLE_LIMIT),
                columns: [
                    column(&c.column1_title, placeholders::COLUMN_1_TITLE, &c.column1_content),
                    column(&c.column2_title, placeholders::COLUMN_2_TITLE, &c.column2_content),
                ],
            },
            LayoutContent::TitleOnly(c) => SlideView::TitleOnly {
                title: shown(&c.title, placeholders::TITLE, TITLE_LIMIT),
                subtitle: shown(&c.subtitle, placeholders::SUBTITLE, SUBTITLE_LIMIT),
            },
        }
    }

    pub fn layout(&self) -> LayoutTag {
        match self {
            SlideView::TitleAndBullets { .. } => LayoutTag::TitleAndBullets,
            SlideView::Quote { .. } => LayoutTag::Quote,
            SlideView::ImageAndParagraph { .. } => LayoutTag::ImageAndParagraph,
            SlideView::TwoColumn { .. } => LayoutTag::TwoColumn,
            SlideView::TitleOnly { .. } => LayoutTag::TitleOnly,
        }
    }

    /// Serializes the view as a self-contained `<div class="slide ...">` fragment.
    pub fn write_html(&self, template: &Template) -> Result<String> {
        let mut html = String::new();
        let colors = &template.colors;
        let layout = self.layout();
        debug!("Writing {} slide with template {}", layout, template.id);

        write!(
            html,
            r#"<div class="slide layout-{}" style="background-color: {}; color: {}; font-family: {}; height: 100%; "#,
            layout.id(),
            colors.background,
            colors.text,
            template.font_family
        )?;

        match self {
            SlideView::TitleAndBullets { title, bullets } => {
                html.push_str(r#"padding: 40px; display: flex; flex-direction: column;">"#);
                write!(
                    html,
                    r#"<h1 class="title" style="color: {}; font-size: 36px; margin: 0 0 30px; overflow: hidden; text-overflow: ellipsis; max-height: 100px;">{}</h1>"#,
                    colors.primary,
                    escape_html(title)
                )?;
                html.push_str(r#"<ul style="margin: 0; padding-left: 30px; overflow: hidden; flex-grow: 1;">"#);
                for bullet in bullets {
                    write!(
                        html,
                        r#"<li style="margin-bottom: 16px; font-size: 22px; line-height: 1.4;">{}</li>"#,
                        escape_html(bullet)
                    )?;
                }
                html.push_str("</ul>");
            }
            SlideView::Quote { quote, attribution } => {
                html.push_str(
                    r#"padding: 40px; display: flex; flex-direction: column; justify-content: center;">"#,
                );
                write!(
                    html,
                    r#"<div class="quote" style="color: {}; font-size: 28px; line-height: 1.5; text-align: center; max-width: 80%; margin: 0 auto 30px; font-style: italic;">"{}"</div>"#,
                    colors.primary,
                    escape_html(quote)
                )?;
                write!(
                    html,
                    r#"<div class="author" style="color: {}; font-size: 20px; text-align: right; margin: 20px 80px 0 0;">{}</div>"#,
                    colors.secondary,
                    escape_html(attribution)
                )?;
            }
            SlideView::ImageAndParagraph {
                title,
                paragraph,
                image_description,
                image_prompt,
            } => {
                html.push_str(r#"padding: 40px;">"#);
                write_heading(&mut html, template, title)?;
                html.push_str(GRID_OPEN);
                write!(
                    html,
                    r#"<div style="overflow: auto; padding-right: 10px;"><p class="paragraph" style="margin: 0; line-height: 1.6; font-size: 20px;">{}</p></div>"#,
                    escape_html(paragraph)
                )?;
                write!(
                    html,
                    r#"<div class="image-placeholder" style="background-color: {}; display: flex; flex-direction: column; align-items: center; justify-content: center; border-radius: 4px; position: relative; border: 2px dashed {};">"#,
                    colors.secondary, colors.primary
                )?;
                write!(
                    html,
                    r#"<div class="image-description" style="text-align: center; padding: 20px; color: {}; max-width: 80%; font-size: 18px;">{}</div>"#,
                    colors.background,
                    escape_html(image_description)
                )?;
                write!(
                    html,
                    r#"<div class="image-prompt" style="position: absolute; bottom: 10px; background-color: {}; color: {}; padding: 8px 12px; border-radius: 4px; font-size: 14px;">Image Prompt: {}</div>"#,
                    colors.primary,
                    colors.background,
                    escape_html(image_prompt)
                )?;
                html.push_str("</div></div>");
            }
            SlideView::TwoColumn { title, columns } => {
                html.push_str(r#"padding: 40px;">"#);
                write_heading(&mut html, template, title)?;
                html.push_str(GRID_OPEN);
                for column in columns {
                    write!(
                        html,
                        r#"<div class="column"><h2 style="color: {}; margin-bottom: 15px; font-size: 24px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;">{}</h2>"#,
                        colors.secondary,
                        escape_html(&column.title)
                    )?;
                    html.push_str(
                        r#"<div style="height: calc(100% - 45px); overflow: auto; padding-right: 10px;">"#,
                    );
                    for entry in &column.entries {
                        write!(
                            html,
                            r#"<p style="margin-bottom: 12px; line-height: 1.6; font-size: 18px;">{}</p>"#,
                            escape_html(entry)
                        )?;
                    }
                    html.push_str("</div></div>");
                }
                html.push_str("</div>");
            }
            SlideView::TitleOnly { title, subtitle } => {
                html.push_str(
                    r#"padding: 60px 40px; display: flex; flex-direction: column; justify-content: center; align-items: center; text-align: center;">"#,
                );
                write!(
                    html,
                    r#"<h1 class="title" style="color: {}; font-size: 48px; margin-bottom: 30px; max-width: 80%; line-height: 1.2;">{}</h1>"#,
                    colors.primary,
                    escape_html(title)
                )?;
                write!(
                    html,
                    r#"<h2 class="subtitle" style="color: {}; font-size: 30px; font-weight: normal; max-width: 70%; line-height: 1.4;">{}</h2>"#,
                    colors.secondary,
                    escape_html(subtitle)
                )?;
            }
        }

        html.push_str("</div>");
        Ok(html)
    }
}

const GRID_OPEN: &str =
    r#"<div style="display: grid; grid-template-columns: 1fr 1fr; gap: 30px; height: calc(100% - 80px);">"#;

fn write_heading(html: &mut String, template: &Template, title: &str) -> Result<()> {
    write!(
        html,
        r#"<h1 class="title" style="color: {}; margin: 0 0 30px; font-size: 36px; overflow: hidden; text-overflow: ellipsis; max-height: 80px;">{}</h1>"#,
        template.colors.primary,
        escape_html(title)
    )?;
    Ok(())
}
