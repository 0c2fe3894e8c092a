//! Markup for the slide edit form and the template selector swatches.

use std::fmt::Write;

use super::{error::Result, utils::escape_html};
use crate::models::{
    draft::EditDraft,
    layout::FieldKind,
    template::Template,
};

const LIST_HELP: &str = "Enter each point on a new line.";

/// Renders the edit form for an open draft. Every value is escaped before it is
/// placed in an attribute or text area.
pub fn render_edit_form(draft: &EditDraft) -> Result<String> {
    let layout = draft.layout();
    let mut html = String::new();

    write!(
        html,
        r#"<div class="edit-form" data-layout="{}"><h2>{}</h2>"#,
        layout.id(),
        layout.edit_heading()
    )?;

    for field in layout.fields() {
        let value = escape_html(draft.value(field.name).unwrap_or_default());
        html.push_str(r#"<div class="form-group">"#);
        write!(
            html,
            r#"<label for="{name}">{label}</label>"#,
            name = field.name,
            label = field.label
        )?;
        match field.kind {
            FieldKind::Line => write!(
                html,
                r#"<input type="text" id="{name}" name="{name}" value="{value}" class="form-control">"#,
                name = field.name,
                value = value
            )?,
            FieldKind::Paragraph { rows } => write!(
                html,
                r#"<textarea id="{name}" name="{name}" rows="{rows}" class="form-control">{value}</textarea>"#,
                name = field.name,
                rows = rows,
                value = value
            )?,
            FieldKind::List { rows } => write!(
                html,
                r#"<p class="form-help">{help}</p><textarea id="{name}" name="{name}" rows="{rows}" class="form-control">{value}</textarea>"#,
                help = LIST_HELP,
                name = field.name,
                rows = rows,
                value = value
            )?,
        }
        html.push_str("</div>");
    }

    html.push_str(
        r#"<div class="edit-actions"><button type="button" id="save-edit" class="btn btn-primary">Save Changes</button><button type="button" id="cancel-edit" class="btn btn-secondary">Cancel</button></div></div>"#,
    );
    Ok(html)
}

/// Renders the selector swatch for one template.
pub fn render_template_preview(template: &Template) -> Result<String> {
    let mut html = String::new();
    let name = escape_html(template.name);
    write!(
        html,
        r#"<div class="template-option" data-template-id="{id}"><div class="template-preview" style="background-color: {bg}; color: {text}"><div style="height: 10px; background-color: {primary}"></div><div style="text-align: center; margin-top: 30px;"><span style="color: {primary}">{name}</span></div></div><p>{name}</p></div>"#,
        id = escape_html(template.id),
        bg = template.colors.background,
        text = template.colors.text,
        primary = template.colors.primary,
        name = name
    )?;
    Ok(html)
}
