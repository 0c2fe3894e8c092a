use serde::Serialize;

/// The five theme colors a template applies to every layout.
/// Values are CSS color strings (`#rrggbb`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeColors {
    /// Headings, quote text and accents on the image placeholder.
    pub primary: &'static str,
    /// Sub-headings, author line and the image placeholder fill.
    pub secondary: &'static str,
    /// Highlight color. Not used by the built-in layouts but part of the theme.
    pub accent: &'static str,
    /// Slide background.
    pub background: &'static str,
    /// Body text.
    pub text: &'static str,
}

/// A visual theme (colors and font), independent of the slide layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier sent to the backend, e.g. `"corporate"`.
    pub id: &'static str,
    /// Display name shown in the template selector.
    pub name: &'static str,
    /// One-line description shown in the template selector.
    pub description: &'static str,
    pub colors: ThemeColors,
    /// A CSS font stack, e.g. `"Arial, sans-serif"`.
    pub font_family: &'static str,
}

impl Template {
    /// Returns the first family of the font stack, trimmed.
    /// Office file writers only accept a single font face.
    pub fn primary_font(&self) -> &'static str {
        self.font_family
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(self.font_family)
    }
}

static TEMPLATES: [Template; 4] = [
    Template {
        id: "corporate",
        name: "Corporate",
        description: "Professional blue theme for business presentations",
        colors: ThemeColors {
            primary: "#0f4c81",
            secondary: "#6e9cc4",
            accent: "#f2b138",
            background: "#ffffff",
            text: "#333333",
        },
        font_family: "Arial, sans-serif",
    },
    Template {
        id: "creative",
        name: "Creative",
        description: "Colorful theme for creative presentations",
        colors: ThemeColors {
            primary: "#ff6b6b",
            secondary: "#4ecdc4",
            accent: "#ffd166",
            background: "#f9f1e6",
            text: "#5a3921",
        },
        font_family: "Georgia, serif",
    },
    Template {
        id: "minimal",
        name: "Minimal",
        description: "Clean, simple design with lots of whitespace",
        colors: ThemeColors {
            primary: "#2c3e50",
            secondary: "#95a5a6",
            accent: "#e74c3c",
            background: "#f8f8f8",
            text: "#222222",
        },
        font_family: "Helvetica, Arial, sans-serif",
    },
    Template {
        id: "dark",
        name: "Dark",
        description: "Dark mode for modern presentations",
        colors: ThemeColors {
            primary: "#bb86fc",
            secondary: "#03dac6",
            accent: "#cf6679",
            background: "#1a1a1a",
            text: "#f5f5f5",
        },
        font_family: "Roboto, sans-serif",
    },
];

/// All registered templates, in selector order.
pub fn templates() -> &'static [Template] {
    &TEMPLATES
}

/// Looks up a template by its id. Returns `None` for unknown ids; callers decide
/// whether that is a validation problem or a render failure.
pub fn lookup(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == id)
}
