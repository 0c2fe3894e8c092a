//! Display limits applied when rendering. Stored content is never truncated.

// Character limits per field. Longer text is cut to (limit - 3) characters plus ELLIPSIS.
pub const TITLE_LIMIT: usize = 80;
pub const SUBTITLE_LIMIT: usize = 120;
pub const QUOTE_LIMIT: usize = 150;
pub const AUTHOR_LIMIT: usize = 50;
pub const PARAGRAPH_LIMIT: usize = 300;
pub const IMAGE_DESCRIPTION_LIMIT: usize = 100;
pub const BULLET_LIMIT: usize = 100; // Also applies to each two-column entry
pub const COLUMN_TITLE_LIMIT: usize = 50;

pub const ELLIPSIS: &str = "...";

/// Bullets beyond this count are not shown on a titleAndBullets slide.
pub const MAX_BULLETS: usize = 5;

pub const IMAGE_PROMPT_PREFIX: &str = "Generate an image of: ";
pub const AUTHOR_PREFIX: &str = "\u{2014} "; // em dash + space
