pub mod client;
pub mod config;
pub mod converters;
pub mod editor;
pub mod errors;
pub mod models;
pub mod wasm;

pub use client::DeckApiClient;
pub use config::DeckConfig;
pub use converters::html::{render, render_slide, RenderError};
pub use converters::normalize::normalize_content;
pub use editor::{Deck, DeckChange, DeckView, Download, InFlight, NavKey};
pub use errors::{DeckError, ErrorCategory, Result};
pub use models::{layout::LayoutTag, slide::Slide, template::Template};
