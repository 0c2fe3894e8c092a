//! The slide deck controller.
//!
//! [`Deck`] owns all presentation state and changes only through its operations.
//! Operations that need the backend are split into a `begin_*` half, which
//! validates and returns the request body, and a `finish_*` half, which takes the
//! outcome of the call. Between the two the deck is busy and rejects other
//! external operations.

mod export;

pub use export::{download_file_name, export_slides, slugify, Download};

use std::fmt;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::config::DeckConfig;
use crate::converters::html::{render_edit_form, render_slide, RenderError};
use crate::errors::{DeckError, Result};
use crate::models::api::{
    ExportRequest, GenerateRequest, GenerateResponse, PresentationId, SaveRequest, SaveResponse,
    SavedPresentation,
};
use crate::models::draft::EditDraft;
use crate::models::slide::Slide;
use crate::models::template;

const MSG_TOPIC_REQUIRED: &str = "Please enter a presentation topic";
const MSG_TEMPLATE_REQUIRED: &str = "Please select a template";
const MSG_SLIDES_REQUIRED: &str = "Please generate slides first";

// --- State types ---

/// Whether the current slide is shown or open in the edit form.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Viewing,
    Editing(EditDraft),
}

/// The external call a deck is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub enum InFlight {
    /// Carries the topic and template the slides were requested for; they are
    /// adopted only when the call succeeds.
    Generate { topic: String, template_id: String },
    Save,
    Export,
}

impl InFlight {
    pub fn name(&self) -> &'static str {
        match self {
            InFlight::Generate { .. } => "generate",
            InFlight::Save => "save",
            InFlight::Export => "export",
        }
    }
}

impl fmt::Display for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation did, so the presentation layer knows what to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeckChange {
    Unchanged,
    Navigated { index: usize },
    EditStarted { index: usize },
    EditSaved { index: usize },
    EditDiscarded,
    TemplateSelected,
    SlidesReplaced { count: usize },
    Saved { id: PresentationId },
}

/// Arrow keys the deck reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            _ => None,
        }
    }
}

/// What the main slide area should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeckView {
    Empty,
    Slide {
        index: usize,
        total: usize,
        markup: String,
    },
    EditForm {
        index: usize,
        markup: String,
    },
}

/// One entry of the thumbnail strip. `markup` is `None` when the slide could not be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumbnail {
    pub index: usize,
    pub active: bool,
    pub markup: Option<String>,
}

/// Which controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActionAvailability {
    pub generate: bool,
    pub regenerate: bool,
    pub save: bool,
    pub export: bool,
    pub edit: bool,
    pub previous: bool,
    pub next: bool,
}

// --- Deck ---

#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    template_id: Option<String>,
    topic: Option<String>,
    current_slide_index: usize,
    mode: Mode,
    presentation_id: Option<PresentationId>,
    is_modified: bool,
    /// Bumped on every change that needs saving.
    revision: u64,
    /// Revision captured by the outstanding save request.
    saving_revision: Option<u64>,
    in_flight: Option<InFlight>,
    config: DeckConfig,
}

impl Default for Deck {
    fn default() -> Self {
        Self::with_config(DeckConfig::default())
    }
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DeckConfig) -> Self {
        Self {
            slides: Vec::new(),
            template_id: None,
            topic: None,
            current_slide_index: 0,
            mode: Mode::Viewing,
            presentation_id: None,
            is_modified: false,
            revision: 0,
            saving_revision: None,
            in_flight: None,
            config,
        }
    }

    /// Opens a presentation previously returned by the save endpoint.
    pub fn from_saved(presentation: SavedPresentation, config: DeckConfig) -> Self {
        info!(
            "Opening saved presentation {} ({} slides)",
            presentation.id,
            presentation.slides.as_ref().map_or(0, Vec::len)
        );
        Self {
            slides: presentation.slides.unwrap_or_default(),
            template_id: presentation.template_id,
            topic: presentation.topic,
            presentation_id: Some(presentation.id),
            ..Self::with_config(config)
        }
    }

    // --- Accessors ---

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_slide_index
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_slide_index)
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn presentation_id(&self) -> Option<PresentationId> {
        self.presentation_id
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match &self.mode {
            Mode::Editing(draft) => Some(draft),
            Mode::Viewing => None,
        }
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    fn mark_modified(&mut self) {
        self.is_modified = true;
        self.revision += 1;
    }

    /// Switches the theme of the whole deck.
    pub fn select_template(&mut self, template_id: &str) -> Result<DeckChange> {
        if template::lookup(template_id).is_none() {
            return Err(RenderError::TemplateNotFound(template_id.to_string()).into());
        }
        if self.template_id.as_deref() == Some(template_id) {
            return Ok(DeckChange::Unchanged);
        }
        self.template_id = Some(template_id.to_string());
        if !self.slides.is_empty() {
            self.mark_modified();
        }
        info!("Selected template '{}'", template_id);
        Ok(DeckChange::TemplateSelected)
    }

    // --- Editing ---

    /// Opens the current slide in the edit form. A no-op while already editing.
    pub fn edit(&mut self) -> Result<DeckChange> {
        if self.is_editing() {
            return Ok(DeckChange::Unchanged);
        }
        let index = self.current_slide_index;
        let slide = self.current_slide().ok_or(DeckError::NoSlides)?;
        let content = slide.normalized().map_err(RenderError::from)?;
        self.mode = Mode::Editing(EditDraft::from_content(&content));
        info!("Editing slide {}", index + 1);
        Ok(DeckChange::EditStarted { index })
    }

    pub fn update_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        match &mut self.mode {
            Mode::Editing(draft) => Ok(draft.set(field, value)?),
            Mode::Viewing => Err(DeckError::NotEditing),
        }
    }

    /// Commits the draft: the current slide's content is replaced wholesale.
    pub fn save_edit(&mut self) -> Result<DeckChange> {
        let draft = match std::mem::replace(&mut self.mode, Mode::Viewing) {
            Mode::Editing(draft) => draft,
            Mode::Viewing => return Err(DeckError::NotEditing),
        };
        let index = self.current_slide_index;
        let slide = self.slides.get_mut(index).ok_or(DeckError::NoSlides)?;
        slide.content = draft.into_content().into_value();
        self.mark_modified();
        info!("Saved edits to slide {}", index + 1);
        Ok(DeckChange::EditSaved { index })
    }

    pub fn cancel_edit(&mut self) -> DeckChange {
        if !self.is_editing() {
            return DeckChange::Unchanged;
        }
        self.mode = Mode::Viewing;
        debug!("Discarded edits to slide {}", self.current_slide_index + 1);
        DeckChange::EditDiscarded
    }

    // --- Navigation ---

    /// Moves to the next slide. `confirm` is asked only while editing; declining
    /// keeps the draft and the current slide.
    pub fn next(&mut self, confirm: impl FnOnce() -> bool) -> DeckChange {
        let target = self.current_slide_index + 1;
        if target >= self.slides.len() {
            return DeckChange::Unchanged;
        }
        self.navigate(target, confirm)
    }

    pub fn previous(&mut self, confirm: impl FnOnce() -> bool) -> DeckChange {
        match self.current_slide_index.checked_sub(1) {
            Some(target) if target < self.slides.len() => self.navigate(target, confirm),
            _ => DeckChange::Unchanged,
        }
    }

    pub fn go_to(&mut self, index: usize, confirm: impl FnOnce() -> bool) -> Result<DeckChange> {
        if index >= self.slides.len() {
            return Err(DeckError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        Ok(self.navigate(index, confirm))
    }

    /// Arrow-key navigation. Ignored while editing or when there is nowhere to go.
    pub fn handle_key(&mut self, key: NavKey) -> DeckChange {
        if self.is_editing() || self.slides.len() <= 1 {
            return DeckChange::Unchanged;
        }
        match key {
            NavKey::Left => self.previous(|| true),
            NavKey::Right => self.next(|| true),
        }
    }

    fn navigate(&mut self, target: usize, confirm: impl FnOnce() -> bool) -> DeckChange {
        if target == self.current_slide_index && !self.is_editing() {
            return DeckChange::Unchanged;
        }
        if self.is_editing() {
            if !confirm() {
                debug!("Navigation to slide {} declined", target + 1);
                return DeckChange::Unchanged;
            }
            self.mode = Mode::Viewing;
            info!("Discarded unsaved edits to slide {}", self.current_slide_index + 1);
        }
        self.current_slide_index = target;
        DeckChange::Navigated { index: target }
    }

    // --- External operations ---

    fn ensure_idle(&self) -> Result<()> {
        match &self.in_flight {
            Some(in_flight) => {
                warn!("Rejected request: {} still in flight", in_flight);
                Err(DeckError::Busy(in_flight.clone()))
            }
            None => Ok(()),
        }
    }

    /// Validates a generation request and marks the deck busy.
    ///
    /// Counts above the configured maximum are clamped; zero is rejected.
    pub fn begin_generate(
        &mut self,
        topic: &str,
        template_id: Option<&str>,
        slide_count: u32,
    ) -> Result<GenerateRequest> {
        self.ensure_idle()?;

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DeckError::InvalidInput(MSG_TOPIC_REQUIRED.to_string()));
        }
        let template_id = template_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DeckError::InvalidInput(MSG_TEMPLATE_REQUIRED.to_string()))?;
        if template::lookup(template_id).is_none() {
            return Err(DeckError::InvalidInput(format!(
                "Unknown template: {}",
                template_id
            )));
        }
        if slide_count == 0 {
            return Err(DeckError::InvalidInput(
                "Slide count must be at least 1".to_string(),
            ));
        }
        let max = self.config.max_slide_count;
        let slide_count = if slide_count > max {
            warn!("Requested {} slides; clamping to {}", slide_count, max);
            max
        } else {
            slide_count
        };

        self.in_flight = Some(InFlight::Generate {
            topic: topic.to_string(),
            template_id: template_id.to_string(),
        });
        info!(
            "Generating {} slides on '{}' with template '{}'",
            slide_count, topic, template_id
        );
        Ok(GenerateRequest {
            template_id: template_id.to_string(),
            topic: topic.to_string(),
            slide_count,
        })
    }

    /// Like [`Deck::begin_generate`], but first discards any open draft.
    pub fn begin_regenerate(
        &mut self,
        topic: &str,
        template_id: Option<&str>,
        slide_count: u32,
    ) -> Result<GenerateRequest> {
        self.ensure_idle()?;
        self.cancel_edit();
        self.begin_generate(topic, template_id, slide_count)
    }

    /// Completes a generation. On failure the earlier slides are kept.
    pub fn finish_generate(&mut self, outcome: Result<GenerateResponse>) -> Result<DeckChange> {
        let (topic, template_id) = match self.in_flight.take() {
            Some(InFlight::Generate { topic, template_id }) => (topic, template_id),
            other => {
                self.in_flight = other;
                return Err(DeckError::NotInFlight("generate"));
            }
        };

        let response = outcome.map_err(|e| {
            error!("Slide generation failed: {}", e);
            e
        })?;

        let count = response.slides.len();
        self.slides = response.slides;
        self.topic = Some(topic);
        self.template_id = Some(template_id);
        self.current_slide_index = 0;
        self.mode = Mode::Viewing;
        self.mark_modified();
        info!("Loaded {} generated slides", count);
        Ok(DeckChange::SlidesReplaced { count })
    }

    /// Validates the deck for saving, commits an open draft, and returns the body to send.
    pub fn begin_save(&mut self) -> Result<SaveRequest> {
        self.ensure_idle()?;
        let (topic, template_id) = self.require_saveable()?;
        if self.is_editing() {
            self.save_edit()?;
        }
        self.in_flight = Some(InFlight::Save);
        self.saving_revision = Some(self.revision);
        info!("Saving presentation '{}'", topic);
        Ok(SaveRequest {
            id: self.presentation_id,
            topic,
            template_id,
            slides: self.slides.clone(),
        })
    }

    /// Completes a save. Changes made while the request was outstanding are not in
    /// the saved copy, so they keep the deck marked as modified.
    pub fn finish_save(&mut self, outcome: Result<SaveResponse>) -> Result<DeckChange> {
        self.take_in_flight(InFlight::Save)?;
        let saved_revision = self.saving_revision.take();
        let response = outcome.map_err(|e| {
            error!("Saving presentation failed: {}", e);
            e
        })?;

        let id = *self
            .presentation_id
            .get_or_insert(response.presentation.id);
        if saved_revision == Some(self.revision) {
            self.is_modified = false;
        } else {
            info!("Deck changed while saving; keeping it marked as modified");
        }
        info!(
            "{}",
            response
                .message
                .as_deref()
                .unwrap_or("Presentation saved successfully")
        );
        Ok(DeckChange::Saved { id })
    }

    /// Commits an open draft and returns the normalized export body.
    pub fn begin_export(&mut self) -> Result<ExportRequest> {
        self.ensure_idle()?;
        let (topic, template_id) = self.require_saveable()?;
        if self.is_editing() {
            self.save_edit()?;
        }
        let slides = export_slides(&self.slides);
        self.in_flight = Some(InFlight::Export);
        info!("Exporting {} slides of '{}'", slides.len(), topic);
        Ok(ExportRequest {
            slides,
            template_id,
            topic,
        })
    }

    /// Wraps the exported bytes with the download file name.
    pub fn finish_export(&mut self, outcome: Result<Vec<u8>>) -> Result<Download> {
        self.take_in_flight(InFlight::Export)?;
        let bytes = outcome.map_err(|e| {
            error!("Export failed: {}", e);
            e
        })?;
        let topic = self.topic.as_deref().unwrap_or_default();
        let file_name = download_file_name(topic, &self.config.export_extension);
        info!("Export ready: {} ({} bytes)", file_name, bytes.len());
        Ok(Download { file_name, bytes })
    }

    fn require_saveable(&self) -> Result<(String, String)> {
        if self.slides.is_empty() {
            return Err(DeckError::InvalidInput(MSG_SLIDES_REQUIRED.to_string()));
        }
        let topic = self
            .topic
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DeckError::InvalidInput(MSG_TOPIC_REQUIRED.to_string()))?;
        let template_id = self
            .template_id
            .clone()
            .ok_or_else(|| DeckError::InvalidInput(MSG_TEMPLATE_REQUIRED.to_string()))?;
        Ok((topic, template_id))
    }

    /// Clears the in-flight marker if it matches `expected`; otherwise leaves it untouched.
    fn take_in_flight(&mut self, expected: InFlight) -> Result<()> {
        if self.in_flight.as_ref() == Some(&expected) {
            self.in_flight = None;
            Ok(())
        } else {
            Err(DeckError::NotInFlight(expected.name()))
        }
    }

    // --- Views ---

    /// Renders the main slide area.
    pub fn view(&self) -> Result<DeckView> {
        let index = self.current_slide_index;
        let Some(slide) = self.current_slide() else {
            return Ok(DeckView::Empty);
        };
        match &self.mode {
            Mode::Editing(draft) => Ok(DeckView::EditForm {
                index,
                markup: render_edit_form(draft)?,
            }),
            Mode::Viewing => {
                let template_id = self.template_id.as_deref().unwrap_or_default();
                let markup = render_slide(slide, template_id).map_err(|e| {
                    error!("Cannot render slide {}: {}", index + 1, e);
                    e
                })?;
                Ok(DeckView::Slide {
                    index,
                    total: self.slides.len(),
                    markup,
                })
            }
        }
    }

    /// Renders every slide for the thumbnail strip. Failures are logged and left blank.
    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        let template_id = self.template_id.as_deref().unwrap_or_default();
        self.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| Thumbnail {
                index,
                active: index == self.current_slide_index,
                markup: render_slide(slide, template_id)
                    .map_err(|e| error!("Cannot render thumbnail {}: {}", index + 1, e))
                    .ok(),
            })
            .collect()
    }

    pub fn actions(&self) -> ActionAvailability {
        let idle = self.in_flight.is_none();
        let has_slides = !self.slides.is_empty();
        let viewing = !self.is_editing();
        ActionAvailability {
            generate: idle,
            regenerate: idle && has_slides,
            save: idle && has_slides,
            export: idle && has_slides,
            edit: has_slides && viewing,
            previous: self.current_slide_index > 0,
            next: self.current_slide_index + 1 < self.slides.len(),
        }
    }
}
