//! Paragraph, run, and hyperlink models.

use serde::{Deserialize, Serialize};

/// Heading level (h1-h6 or none).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[default]
    None,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Create a heading level from a number (1-6).
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            6 => HeadingLevel::H6,
            _ => HeadingLevel::None,
        }
    }

    /// Get the numeric level (0 for none, 1-6 for headings).
    pub fn level(&self) -> u8 {
        match self {
            HeadingLevel::None => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// Check if this is a heading (not None).
    pub fn is_heading(&self) -> bool {
        !matches!(self, HeadingLevel::None)
    }

    fn is_none(&self) -> bool {
        matches!(self, HeadingLevel::None)
    }
}

/// List marker kind resolved through the numbering tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Unordered (bulleted) list, rendered with a `-` marker.
    Bullet,
    /// Any ordered format (decimal, letters, roman), rendered as `1.`.
    #[default]
    Ordered,
}

/// List membership for a paragraph.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListInfo {
    /// Marker kind
    pub kind: ListKind,
    /// Nesting level (0 = top level)
    pub level: u8,
}

/// Character style carried by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

impl TextStyle {
    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Create an italic style.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }
}

/// A run of text with consistent styling.
///
/// `text` holds the run's own content with tabs and line breaks already
/// expanded to their Markdown forms. `textboxes` holds paragraphs extracted
/// from floating text boxes anchored in this run; when any of them renders
/// non-empty, their deduplicated text replaces `text` entirely (the same
/// content is usually mirrored in both places).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    #[serde(default)]
    pub text: String,

    /// Character styling
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: TextStyle,

    /// Paragraphs from floating text boxes anchored in this run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub textboxes: Vec<Paragraph>,
}

fn is_default_style(style: &TextStyle) -> bool {
    *style == TextStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            ..Default::default()
        }
    }
}

/// A hyperlink with its display runs.
///
/// The target is resolved through the relationship table at parse time;
/// `None` means the reference id had no entry and the link degrades to its
/// display text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Resolved target, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Display runs
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// An inline element within a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Run(TextRun),
    Hyperlink(Hyperlink),
}

/// A paragraph of the document body (or of nested text-box content).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in document order
    #[serde(default)]
    pub inlines: Vec<Inline>,

    /// Heading level from the paragraph style
    #[serde(default, skip_serializing_if = "HeadingLevel::is_none")]
    pub heading: HeadingLevel,

    /// List membership, if the paragraph has numbering properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListInfo>,

    /// Floating text-box paragraphs found anywhere beneath this paragraph,
    /// used as fallback content when the inline content renders empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floating: Vec<Paragraph>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            inlines: vec![Inline::Run(TextRun::plain(text))],
            ..Default::default()
        }
    }

    /// Get the unstyled text of the paragraph's own runs.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Run(run) => run.text.clone(),
                Inline::Hyperlink(link) => {
                    link.runs.iter().map(|r| r.text.as_str()).collect()
                }
            })
            .collect()
    }

    /// Check if this paragraph is a heading.
    pub fn is_heading(&self) -> bool {
        self.heading.is_heading()
    }

    /// Check if this paragraph is a list item.
    pub fn is_list_item(&self) -> bool {
        self.list.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(HeadingLevel::from_number(1), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_number(6), HeadingLevel::H6);
        assert_eq!(HeadingLevel::from_number(7), HeadingLevel::None);
        assert_eq!(HeadingLevel::from_number(0), HeadingLevel::None);

        assert_eq!(HeadingLevel::H3.level(), 3);
        assert!(HeadingLevel::H1.is_heading());
        assert!(!HeadingLevel::None.is_heading());
    }

    #[test]
    fn test_paragraph() {
        let para = Paragraph::with_text("Hello, World!");
        assert_eq!(para.plain_text(), "Hello, World!");
        assert!(!para.is_heading());
        assert!(!para.is_list_item());
    }

    #[test]
    fn test_plain_text_spans_hyperlinks() {
        let para = Paragraph {
            inlines: vec![
                Inline::Run(TextRun::plain("see ")),
                Inline::Hyperlink(Hyperlink {
                    target: Some("https://example.com".to_string()),
                    runs: vec![TextRun::plain("the docs")],
                }),
            ],
            ..Default::default()
        };
        assert_eq!(para.plain_text(), "see the docs");
    }

    #[test]
    fn test_paragraph_serialization() {
        let para = Paragraph::with_text("Test");
        let json = serde_json::to_string(&para).unwrap();
        // Default values should not be serialized
        assert!(!json.contains("heading"));
        assert!(!json.contains("list"));
        assert!(!json.contains("floating"));

        let back: Paragraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.plain_text(), "Test");
    }
}
