//! Request and response bodies exchanged with the generation backend.
//! Field names follow the backend's JSON, which calls the template id `template`.

use serde::{Deserialize, Serialize};

use crate::models::content::LayoutContent;
use crate::models::layout::LayoutTag;
use crate::models::slide::Slide;

/// Identifier the backend assigns to a presentation on its first save.
pub type PresentationId = u64;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(rename = "template")]
    pub template_id: String,
    pub topic: String,
    pub slide_count: u32,
}

/// Response of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub slides: Vec<Slide>,
    /// Echo of the requested template id.
    #[serde(default)]
    pub template: Option<String>,
}

/// Body of `POST /api/save`. A missing `id` asks the backend to create a new presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub id: Option<PresentationId>,
    pub topic: String,
    #[serde(rename = "template")]
    pub template_id: String,
    pub slides: Vec<Slide>,
}

/// A presentation as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPresentation {
    pub id: PresentationId,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub slide_count: Option<u32>,
    #[serde(default)]
    pub slides: Option<Vec<Slide>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response of `POST /api/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub presentation: SavedPresentation,
}

/// One slide of an export request: plain fields only, placeholders filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSlide {
    pub layout: LayoutTag,
    pub content: LayoutContent,
}

/// Body of `POST /api/export`. The response is the binary presentation file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub slides: Vec<ExportSlide>,
    #[serde(rename = "template")]
    pub template_id: String,
    pub topic: String,
}

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}
