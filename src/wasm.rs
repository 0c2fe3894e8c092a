//! Browser bindings.
//!
//! Structured values cross the boundary as JSON strings. Every export has a
//! plain-Rust counterpart that reports errors as `String`, so the logic can be
//! exercised without a JavaScript host.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::DeckConfig;
use crate::converters::html::{render, resolve_template};
use crate::editor::{self, Deck, DeckChange, InFlight, NavKey};
use crate::errors::DeckError;
use crate::models::api::{GenerateResponse, SaveResponse, SavedPresentation};
use crate::models::template::{self, Template};

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn message(error: DeckError) -> String {
    error.to_string()
}

/// A stored presentation as the page may hold it: wrapped in a save response,
/// or the bare object the editor page is rendered with.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPresentation {
    Wrapped(SaveResponse),
    Bare(SavedPresentation),
}

impl StoredPresentation {
    fn into_presentation(self) -> SavedPresentation {
        match self {
            StoredPresentation::Wrapped(response) => response.presentation,
            StoredPresentation::Bare(presentation) => presentation,
        }
    }
}

/// Renders one slide to HTML.
///
/// # Arguments
/// * `layout` - The layout tag, e.g. `titleAndBullets`
/// * `content_json` - The slide content as JSON, in any shape the backend produces
/// * `template_id` - Id of a built-in template
#[wasm_bindgen]
pub fn render_slide(layout: &str, content_json: &str, template_id: &str) -> Result<String, JsValue> {
    render_slide_impl(layout, content_json, template_id).map_err(|e| JsValue::from_str(&e))
}

fn render_slide_impl(layout: &str, content_json: &str, template_id: &str) -> Result<String, String> {
    let content: serde_json::Value =
        serde_json::from_str(content_json).map_err(|e| format!("Invalid slide content: {}", e))?;
    let template = resolve_template(template_id).map_err(|e| e.to_string())?;
    render(layout, &content, template).map_err(|e| e.to_string())
}

/// The built-in templates as a JSON array.
#[wasm_bindgen]
pub fn list_templates() -> Result<String, JsValue> {
    to_json(template::templates()).map_err(|e| JsValue::from_str(&e))
}

/// Selector swatch for one template.
#[wasm_bindgen]
pub fn template_preview(template_id: &str) -> Result<String, JsValue> {
    template_preview_impl(template_id).map_err(|e| JsValue::from_str(&e))
}

fn template_preview_impl(template_id: &str) -> Result<String, String> {
    let template: &Template = resolve_template(template_id).map_err(|e| e.to_string())?;
    crate::converters::html::render_template_preview(template).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn download_file_name(topic: &str, extension: &str) -> String {
    editor::download_file_name(topic, extension)
}

/// A [`Deck`] owned by the page.
///
/// Methods that call the backend come in pairs: `begin_*` returns the JSON body to
/// post, and the page reports back with `finish_*` or [`DeckHandle::fail`].
#[wasm_bindgen]
pub struct DeckHandle {
    deck: Deck,
}

impl Default for DeckHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DeckHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DeckHandle {
        DeckHandle {
            deck: Deck::with_config(DeckConfig::default()),
        }
    }

    /// Opens a stored presentation. Accepts either the save endpoint's response
    /// (`{"presentation": {...}}`) or the bare presentation object.
    pub fn from_saved(presentation_json: &str) -> Result<DeckHandle, String> {
        let stored: StoredPresentation = serde_json::from_str(presentation_json)
            .map_err(|e| format!("Invalid presentation: {}", e))?;
        Ok(DeckHandle {
            deck: Deck::from_saved(stored.into_presentation(), DeckConfig::default()),
        })
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.deck.current_index()
    }

    pub fn is_editing(&self) -> bool {
        self.deck.is_editing()
    }

    pub fn is_modified(&self) -> bool {
        self.deck.is_modified()
    }

    pub fn slides_json(&self) -> Result<String, String> {
        to_json(self.deck.slides())
    }

    pub fn select_template(&mut self, template_id: &str) -> Result<String, String> {
        let change = self.deck.select_template(template_id).map_err(message)?;
        to_json(&change)
    }

    // --- Editing ---

    pub fn edit(&mut self) -> Result<String, String> {
        let change = self.deck.edit().map_err(message)?;
        to_json(&change)
    }

    pub fn update_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        self.deck.update_field(field, value).map_err(message)
    }

    pub fn save_edit(&mut self) -> Result<String, String> {
        let change = self.deck.save_edit().map_err(message)?;
        to_json(&change)
    }

    pub fn cancel_edit(&mut self) -> Result<String, String> {
        to_json(&self.deck.cancel_edit())
    }

    // --- Navigation ---
    // `confirmed` is the answer to the unsaved-edits prompt, asked by the page
    // beforehand whenever `is_editing()` is true.

    pub fn next(&mut self, confirmed: bool) -> Result<String, String> {
        to_json(&self.deck.next(|| confirmed))
    }

    pub fn previous(&mut self, confirmed: bool) -> Result<String, String> {
        to_json(&self.deck.previous(|| confirmed))
    }

    pub fn go_to(&mut self, index: i32, confirmed: bool) -> Result<String, String> {
        let index = usize::try_from(index).map_err(|_| {
            message(DeckError::InvalidInput(format!(
                "Slide index {} is out of range",
                index
            )))
        })?;
        let change = self.deck.go_to(index, || confirmed).map_err(message)?;
        to_json(&change)
    }

    /// Handles a `KeyboardEvent.key`. Returns whether the deck moved.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match NavKey::from_key(key) {
            Some(key) => self.deck.handle_key(key) != DeckChange::Unchanged,
            None => false,
        }
    }

    // --- External operations ---

    pub fn begin_generate(
        &mut self,
        topic: &str,
        template_id: Option<String>,
        slide_count: u32,
    ) -> Result<String, String> {
        let request = self
            .deck
            .begin_generate(topic, template_id.as_deref(), slide_count)
            .map_err(message)?;
        to_json(&request)
    }

    pub fn begin_regenerate(
        &mut self,
        topic: &str,
        template_id: Option<String>,
        slide_count: u32,
    ) -> Result<String, String> {
        let request = self
            .deck
            .begin_regenerate(topic, template_id.as_deref(), slide_count)
            .map_err(message)?;
        to_json(&request)
    }

    pub fn finish_generate(&mut self, response_json: &str) -> Result<String, String> {
        let outcome = serde_json::from_str::<GenerateResponse>(response_json).map_err(DeckError::from);
        let change = self.deck.finish_generate(outcome).map_err(message)?;
        to_json(&change)
    }

    pub fn begin_save(&mut self) -> Result<String, String> {
        let request = self.deck.begin_save().map_err(message)?;
        to_json(&request)
    }

    pub fn finish_save(&mut self, response_json: &str) -> Result<String, String> {
        let outcome = serde_json::from_str::<SaveResponse>(response_json).map_err(DeckError::from);
        let change = self.deck.finish_save(outcome).map_err(message)?;
        to_json(&change)
    }

    pub fn begin_export(&mut self) -> Result<String, String> {
        let request = self.deck.begin_export().map_err(message)?;
        to_json(&request)
    }

    /// Returns the download file name for the exported bytes.
    pub fn finish_export(&mut self, bytes: Vec<u8>) -> Result<String, String> {
        let download = self.deck.finish_export(Ok(bytes)).map_err(message)?;
        Ok(download.file_name)
    }

    /// Reports a failed backend call for whatever request is in flight and returns
    /// the message to show. The deck keeps its earlier state and becomes idle again.
    pub fn fail(&mut self, status: u16, error: &str) -> Result<String, String> {
        let failure = DeckError::ApiError {
            status: reqwest::StatusCode::from_u16(status)
                .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            message: error.to_string(),
        };
        let outcome = match self.deck.in_flight().cloned() {
            Some(InFlight::Generate { .. }) => self.deck.finish_generate(Err(failure)).map(drop),
            Some(InFlight::Save) => self.deck.finish_save(Err(failure)).map(drop),
            Some(InFlight::Export) => self.deck.finish_export(Err(failure)).map(drop),
            None => return Err(message(DeckError::NotInFlight("backend"))),
        };
        Ok(outcome.err().map(message).unwrap_or_default())
    }

    // --- Views ---

    pub fn view(&self) -> Result<String, String> {
        let view = self.deck.view().map_err(message)?;
        to_json(&view)
    }

    pub fn thumbnails(&self) -> Result<String, String> {
        to_json(&self.deck.thumbnails())
    }

    pub fn actions(&self) -> Result<String, String> {
        to_json(&self.deck.actions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn generated_handle() -> DeckHandle {
        let mut handle = DeckHandle::new();
        handle
            .begin_generate("Web Rust", Some("creative".into()), 2)
            .unwrap();
        let response = json!({
            "slides": [
                {"layout": "titleOnly", "content": {"title": "Web Rust"}},
                {"layout": "twoColumn", "content": {"column1Content": [{"bulletPoint": "x"}, "y"]}}
            ],
            "template": "creative"
        });
        handle.finish_generate(&response.to_string()).unwrap();
        handle
    }

    #[test]
    fn render_slide_accepts_loose_content() {
        let html = render_slide_impl(
            "twoColumn",
            r#"{"column1Content": [{"bulletPoint": "x"}, "y"]}"#,
            "minimal",
        )
        .unwrap();
        assert!(html.contains("x") && html.contains("y"));
        assert!(html.contains("Column 2"));
    }

    #[test]
    fn render_slide_reports_bad_input() {
        assert!(render_slide_impl("quote", "not json", "minimal")
            .unwrap_err()
            .starts_with("Invalid slide content"));
        assert!(render_slide_impl("quote", "{}", "neon").unwrap_err().contains("neon"));
        assert!(render_slide_impl("hero", "{}", "dark").unwrap_err().contains("hero"));
    }

    #[test]
    fn template_previews_resolve_ids() {
        assert!(template_preview_impl("corporate").unwrap().contains("Corporate"));
        assert!(template_preview_impl("neon").is_err());
        let listed: Value = serde_json::from_str(&to_json(template::templates()).unwrap()).unwrap();
        assert_eq!(listed.as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn generate_flow_through_json() {
        let mut handle = generated_handle();
        assert_eq!(handle.len(), 2);
        let view: Value = serde_json::from_str(&handle.view().unwrap()).unwrap();
        assert_eq!(view["kind"], "slide");
        assert_eq!(view["total"], 2);

        assert!(handle.handle_key("ArrowRight"));
        assert!(!handle.handle_key("ArrowRight"));
        assert_eq!(handle.current_index(), 1);
    }

    #[test]
    fn negative_index_is_rejected_without_moving() {
        let mut handle = generated_handle();
        assert!(handle.go_to(-1, true).is_err());
        assert!(handle.go_to(2, true).is_err());
        assert_eq!(handle.current_index(), 0);
        let change: Value = serde_json::from_str(&handle.go_to(1, true).unwrap()).unwrap();
        assert_eq!(change, json!({"kind": "navigated", "index": 1}));
    }

    #[test]
    fn failure_releases_the_deck() {
        let mut handle = generated_handle();
        handle.begin_save().unwrap();
        assert!(handle.begin_export().unwrap_err().contains("in flight"));
        let shown = handle.fail(503, "Service unavailable").unwrap();
        assert!(shown.contains("Service unavailable"));
        let actions: Value = serde_json::from_str(&handle.actions().unwrap()).unwrap();
        assert_eq!(actions["save"], true);
        assert!(handle.fail(500, "nothing pending").is_err());

        handle.begin_export().unwrap();
        assert_eq!(
            handle.finish_export(vec![0x50, 0x4b]).unwrap(),
            "web_rust_presentation.pptx"
        );
    }

    #[test]
    fn opens_wrapped_and_bare_presentations() {
        let bare = json!({
            "id": 3,
            "topic": "Ownership",
            "template_id": "dark",
            "slides": [{"layout": "titleOnly", "content": {"title": "Ownership"}}]
        });
        let wrapped = json!({"message": "ok", "presentation": bare.clone()});

        for payload in [bare, wrapped] {
            let handle = DeckHandle::from_saved(&payload.to_string()).unwrap();
            assert_eq!(handle.len(), 1);
            assert!(!handle.is_modified());
            let view: Value = serde_json::from_str(&handle.view().unwrap()).unwrap();
            assert!(view["markup"].as_str().unwrap().contains("Ownership"));
        }
        assert!(DeckHandle::from_saved(r#"{"topic": "no id"}"#).is_err());
    }

    #[test]
    fn failed_generation_is_reported_and_releases_the_deck() {
        let mut handle = generated_handle();
        handle
            .begin_regenerate("Other", Some("minimal".into()), 3)
            .unwrap();
        let shown = handle.fail(502, "Failed to generate presentation").unwrap();
        assert!(shown.contains("Failed to generate presentation"));
        assert_eq!(handle.len(), 2);
        assert!(handle.begin_export().is_ok());
    }

    #[test]
    fn edits_cross_the_boundary() {
        let mut handle = generated_handle();
        handle.edit().unwrap();
        handle.update_field("subtitle", "In the browser").unwrap();
        assert!(handle.update_field("bullets", "x").is_err());
        handle.save_edit().unwrap();
        let slides: Value = serde_json::from_str(&handle.slides_json().unwrap()).unwrap();
        assert_eq!(slides[0]["content"]["subtitle"], "In the browser");
        assert!(handle.is_modified());
    }
}
