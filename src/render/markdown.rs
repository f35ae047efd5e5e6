//! Markdown renderer: document model to Markdown text.

use crate::model::{
    Block, Cell, Document, Hyperlink, Inline, ListKind, Paragraph, Table, TextRun, TextStyle,
};

use super::cleanup;

/// Convert a document model to Markdown.
///
/// A pure function of the model: all cross-structure lookups (hyperlink
/// targets, list formats) were resolved into the model at parse time.
pub fn to_markdown(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in &doc.blocks {
        match block {
            Block::Paragraph(para) => render_block_paragraph(para, &mut lines),
            Block::Table(table) => render_table(table, &mut lines),
        }
    }

    cleanup::normalize_lines(&lines)
}

/// Render one body paragraph into the line sequence.
///
/// Classification was fixed at parse time and is resolved in priority
/// order: heading, then list item, then plain text. An empty paragraph
/// becomes a blank line to preserve paragraph spacing.
fn render_block_paragraph(para: &Paragraph, lines: &mut Vec<String>) {
    let text = paragraph_text(para);
    if text.is_empty() {
        lines.push(String::new());
        return;
    }

    // Deduplicate before the heading/list prefix is attached, so marker
    // indentation survives the whitespace tokenization.
    let text = cleanup::dedup_repeat_line(&text);

    let line = if para.heading.is_heading() {
        format!("{} {}", "#".repeat(para.heading.level() as usize), text)
    } else if let Some(list) = para.list {
        let marker = match list.kind {
            ListKind::Bullet => "-",
            // Always the literal "1.": Markdown renumbers ordered lists on
            // its own, so no per-level counters are tracked.
            ListKind::Ordered => "1.",
        };
        format!("{}{} {}", "  ".repeat(list.level as usize), marker, text)
    } else {
        text
    };

    lines.push(line);
}

/// Render a table as pipe-delimited rows.
///
/// A `---` separator sized to the first row's cell count follows that row;
/// one blank line closes the table. A rowless table emits nothing.
fn render_table(table: &Table, lines: &mut Vec<String>) {
    if table.rows.is_empty() {
        return;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row.cells.iter().map(cell_text).collect();
        lines.push(format!("| {} |", cells.join(" | ")));

        if i == 0 && !cells.is_empty() {
            lines.push(format!("| {} |", vec!["---"; cells.len()].join(" | ")));
        }
    }

    lines.push(String::new());
}

fn cell_text(cell: &Cell) -> String {
    let texts: Vec<String> = cell
        .paragraphs
        .iter()
        .map(paragraph_text)
        .filter(|t| !t.is_empty())
        .collect();
    texts.join(" ").replace('|', "\\|")
}

/// Render a paragraph's inline content.
///
/// Inline renderings concatenate in document order and the result is
/// trimmed. When that yields nothing, floating text-box paragraphs found
/// beneath the paragraph are rendered instead, joined by single spaces;
/// this covers floating shapes not anchored inside any run.
pub(crate) fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    for inline in &para.inlines {
        match inline {
            Inline::Run(run) => out.push_str(&run_text(run)),
            Inline::Hyperlink(link) => out.push_str(&hyperlink_text(link)),
        }
    }

    let trimmed = out.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    let fragments: Vec<String> = para
        .floating
        .iter()
        .map(paragraph_text)
        .filter(|t| !t.is_empty())
        .collect();
    fragments.join(" ")
}

/// Render one run.
///
/// Text-box content takes precedence over the run's own text: the same
/// content is typically mirrored in both places, so reporting both would
/// double it. Identical fragments are deduplicated by exact match before
/// joining.
fn run_text(run: &TextRun) -> String {
    let mut fragments: Vec<String> = Vec::new();
    for para in &run.textboxes {
        let text = paragraph_text(para);
        if !text.is_empty() && !fragments.contains(&text) {
            fragments.push(text);
        }
    }

    let text = if fragments.is_empty() {
        run.text.clone()
    } else {
        fragments.join(" ")
    };

    apply_emphasis(text, run.style)
}

/// Wrap text in emphasis markers.
///
/// Bold applies first; italic then either wraps normally or, when the text
/// already carries the bold wrapper, upgrades it to the single combined
/// `***…***` form instead of nesting markers. Empty text is never wrapped.
fn apply_emphasis(text: String, style: TextStyle) -> String {
    if text.is_empty() {
        return text;
    }

    let mut text = text;
    if style.bold {
        text = format!("**{}**", text);
    }
    if style.italic {
        text = match text
            .strip_prefix("**")
            .and_then(|t| t.strip_suffix("**"))
        {
            Some(inner) => format!("***{}***", inner),
            None => format!("*{}*", text),
        };
    }
    text
}

/// Render a hyperlink from its display runs and resolved target.
fn hyperlink_text(link: &Hyperlink) -> String {
    let rendered: String = link.runs.iter().map(run_text).collect();
    let display = rendered.trim();
    let display = if display.is_empty() { "link" } else { display };

    match link.target.as_deref() {
        Some(target) => format!("[{}]({})", display, target),
        None => display.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, ListInfo, Row};

    fn doc_with(blocks: Vec<Block>) -> Document {
        Document { blocks }
    }

    #[test]
    fn test_heading_render() {
        let mut para = Paragraph::with_text("Quarterly Report");
        para.heading = HeadingLevel::H3;
        let md = to_markdown(&doc_with(vec![Block::Paragraph(para)]));
        assert_eq!(md, "### Quarterly Report\n");
    }

    #[test]
    fn test_list_markers_and_indent() {
        let mut bullet = Paragraph::with_text("first");
        bullet.list = Some(ListInfo {
            kind: ListKind::Bullet,
            level: 0,
        });
        let mut nested = Paragraph::with_text("second");
        nested.list = Some(ListInfo {
            kind: ListKind::Ordered,
            level: 2,
        });

        let md = to_markdown(&doc_with(vec![
            Block::Paragraph(bullet),
            Block::Paragraph(nested),
        ]));
        assert_eq!(md, "- first\n    1. second\n");
    }

    #[test]
    fn test_heading_takes_precedence_over_list() {
        let mut para = Paragraph::with_text("Both");
        para.heading = HeadingLevel::H2;
        para.list = Some(ListInfo {
            kind: ListKind::Bullet,
            level: 0,
        });
        let md = to_markdown(&doc_with(vec![Block::Paragraph(para)]));
        assert_eq!(md, "## Both\n");
    }

    #[test]
    fn test_emphasis_wrapping() {
        assert_eq!(
            apply_emphasis("b".to_string(), TextStyle::bold()),
            "**b**"
        );
        assert_eq!(
            apply_emphasis("i".to_string(), TextStyle::italic()),
            "*i*"
        );
        let both = TextStyle {
            bold: true,
            italic: true,
        };
        assert_eq!(apply_emphasis("x".to_string(), both), "***x***");
        // empty text never gains markers
        assert_eq!(apply_emphasis(String::new(), both), "");
    }

    #[test]
    fn test_hyperlink_render() {
        let link = Hyperlink {
            target: Some("https://example.com".to_string()),
            runs: vec![TextRun::plain("Docs")],
        };
        assert_eq!(hyperlink_text(&link), "[Docs](https://example.com)");

        let unresolved = Hyperlink {
            target: None,
            runs: vec![TextRun::plain("Docs")],
        };
        assert_eq!(hyperlink_text(&unresolved), "Docs");

        let empty_display = Hyperlink {
            target: Some("https://example.com".to_string()),
            runs: vec![],
        };
        assert_eq!(hyperlink_text(&empty_display), "[link](https://example.com)");
    }

    #[test]
    fn test_textbox_content_replaces_run_text() {
        let run = TextRun {
            text: "mirrored".to_string(),
            textboxes: vec![
                Paragraph::with_text("boxed"),
                Paragraph::with_text("boxed"),
                Paragraph::with_text("other"),
            ],
            ..Default::default()
        };
        assert_eq!(run_text(&run), "boxed other");
    }

    #[test]
    fn test_empty_textboxes_fall_back_to_run_text() {
        let run = TextRun {
            text: "kept".to_string(),
            textboxes: vec![Paragraph::new()],
            ..Default::default()
        };
        assert_eq!(run_text(&run), "kept");
    }

    #[test]
    fn test_paragraph_floating_fallback() {
        let para = Paragraph {
            floating: vec![Paragraph::with_text("shape one"), Paragraph::with_text("shape two")],
            ..Default::default()
        };
        assert_eq!(paragraph_text(&para), "shape one shape two");
    }

    #[test]
    fn test_empty_paragraph_preserves_spacing() {
        let md = to_markdown(&doc_with(vec![
            Block::Paragraph(Paragraph::with_text("above")),
            Block::Paragraph(Paragraph::new()),
            Block::Paragraph(Paragraph::with_text("below")),
        ]));
        assert_eq!(md, "above\n\nbelow\n");
    }

    #[test]
    fn test_mirrored_line_is_deduplicated() {
        let mut para = Paragraph::with_text("Revenue Growth Revenue Growth");
        para.heading = HeadingLevel::H1;
        let md = to_markdown(&doc_with(vec![Block::Paragraph(para)]));
        assert_eq!(md, "# Revenue Growth\n");
    }

    #[test]
    fn test_table_render() {
        let table = Table {
            rows: vec![
                Row {
                    cells: vec![
                        Cell::with_text("Name"),
                        Cell::with_text("Qty"),
                        Cell::with_text("Unit | Price"),
                    ],
                },
                Row {
                    cells: vec![
                        Cell::with_text("Bolt"),
                        Cell::with_text("40"),
                        Cell::with_text("0.10"),
                    ],
                },
            ],
        };

        let md = to_markdown(&doc_with(vec![Block::Table(table)]));
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| Name | Qty | Unit \\| Price |");
        assert_eq!(lines[1], "| --- | --- | --- |");
        assert_eq!(lines[2], "| Bolt | 40 | 0.10 |");
        assert_eq!(lines[0].matches('|').count() - 1, 4); // escaped pipe adds one
        assert_eq!(lines[2].matches('|').count(), 4);
    }

    #[test]
    fn test_rowless_table_emits_nothing() {
        let md = to_markdown(&doc_with(vec![Block::Table(Table::new())]));
        assert_eq!(md, "\n");
    }

    #[test]
    fn test_blank_block_run_collapses() {
        let mut blocks = vec![Block::Paragraph(Paragraph::with_text("start"))];
        for _ in 0..5 {
            blocks.push(Block::Paragraph(Paragraph::new()));
        }
        blocks.push(Block::Paragraph(Paragraph::with_text("end")));

        let md = to_markdown(&doc_with(blocks));
        assert_eq!(md, "start\n\n\nend\n");
    }
}
