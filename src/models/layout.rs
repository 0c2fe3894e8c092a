use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of slide layouts the generator and renderer understand.
/// The JSON representation is the camelCase tag, e.g. `"titleAndBullets"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutTag {
    /// A heading followed by up to five bullet points.
    TitleAndBullets,
    /// A centered quotation with its author.
    Quote,
    /// A heading, a paragraph and a described image placeholder side by side.
    ImageAndParagraph,
    /// A heading over two titled columns of points.
    TwoColumn,
    /// A title slide with a subtitle.
    TitleOnly,
}

/// Returned when a layout tag is not one of [`LayoutTag::ALL`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown layout: {0}")]
pub struct ParseLayoutError(pub String);

impl LayoutTag {
    pub const ALL: [LayoutTag; 5] = [
        LayoutTag::TitleAndBullets,
        LayoutTag::Quote,
        LayoutTag::ImageAndParagraph,
        LayoutTag::TwoColumn,
        LayoutTag::TitleOnly,
    ];

    /// The wire tag.
    pub fn id(self) -> &'static str {
        match self {
            LayoutTag::TitleAndBullets => "titleAndBullets",
            LayoutTag::Quote => "quote",
            LayoutTag::ImageAndParagraph => "imageAndParagraph",
            LayoutTag::TwoColumn => "twoColumn",
            LayoutTag::TitleOnly => "titleOnly",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LayoutTag::TitleAndBullets => "Title and Bullets",
            LayoutTag::Quote => "Quote",
            LayoutTag::ImageAndParagraph => "Image and Paragraph",
            LayoutTag::TwoColumn => "Two Columns",
            LayoutTag::TitleOnly => "Title Only",
        }
    }

    /// Heading of the edit form for this layout.
    pub fn edit_heading(self) -> &'static str {
        match self {
            LayoutTag::TitleAndBullets => "Edit Title and Bullets",
            LayoutTag::Quote => "Edit Quote",
            LayoutTag::ImageAndParagraph => "Edit Image and Paragraph",
            LayoutTag::TwoColumn => "Edit Two Columns",
            LayoutTag::TitleOnly => "Edit Title Slide",
        }
    }

    /// The editable fields of this layout, in form order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            LayoutTag::TitleAndBullets => &TITLE_AND_BULLETS_FIELDS,
            LayoutTag::Quote => &QUOTE_FIELDS,
            LayoutTag::ImageAndParagraph => &IMAGE_AND_PARAGRAPH_FIELDS,
            LayoutTag::TwoColumn => &TWO_COLUMN_FIELDS,
            LayoutTag::TitleOnly => &TITLE_ONLY_FIELDS,
        }
    }

    /// Finds the field named `name` on this layout.
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }
}

impl fmt::Display for LayoutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LayoutTag {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutTag::ALL
            .into_iter()
            .find(|tag| tag.id() == s)
            .ok_or_else(|| ParseLayoutError(s.to_string()))
    }
}

/// How a field is presented in the edit form and stored after saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single-line text input.
    Line,
    /// A multi-line text area holding one string.
    Paragraph { rows: u8 },
    /// A multi-line text area where every non-empty line becomes one list entry.
    List { rows: u8 },
}

/// Describes one editable content field of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The content key, e.g. `"column1Content"`.
    pub name: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_list(&self) -> bool {
        matches!(self.kind, FieldKind::List { .. })
    }
}

const fn line(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Line,
    }
}

static TITLE_AND_BULLETS_FIELDS: [FieldSpec; 2] = [
    line("title", "Title:"),
    FieldSpec {
        name: "bullets",
        label: "Bullet Points:",
        kind: FieldKind::List { rows: 6 },
    },
];

static QUOTE_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        name: "quote",
        label: "Quote:",
        kind: FieldKind::Paragraph { rows: 4 },
    },
    line("author", "Author:"),
];

static IMAGE_AND_PARAGRAPH_FIELDS: [FieldSpec; 3] = [
    line("title", "Title:"),
    FieldSpec {
        name: "paragraph",
        label: "Paragraph:",
        kind: FieldKind::Paragraph { rows: 5 },
    },
    line("imageDescription", "Image Description:"),
];

static TWO_COLUMN_FIELDS: [FieldSpec; 5] = [
    line("title", "Title:"),
    line("column1Title", "Column 1 Title:"),
    FieldSpec {
        name: "column1Content",
        label: "Column 1 Content:",
        kind: FieldKind::List { rows: 6 },
    },
    line("column2Title", "Column 2 Title:"),
    FieldSpec {
        name: "column2Content",
        label: "Column 2 Content:",
        kind: FieldKind::List { rows: 6 },
    },
];

static TITLE_ONLY_FIELDS: [FieldSpec; 2] = [line("title", "Title:"), line("subtitle", "Subtitle:")];
