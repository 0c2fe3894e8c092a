use thiserror::Error;

use crate::models::layout::ParseLayoutError;

/// Errors that can occur while rendering a slide or edit form to HTML.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout not found: {0}")]
    LayoutNotFound(String),
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    #[error("Formatting error during HTML generation: {0}")]
    Format(#[from] std::fmt::Error),
}

impl From<ParseLayoutError> for RenderError {
    fn from(err: ParseLayoutError) -> Self {
        RenderError::LayoutNotFound(err.0)
    }
}

/// A specialized Result type for HTML rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
