pub mod api;
pub mod content;
pub mod draft;
pub mod layout;
pub mod slide;
pub mod template;
