//! DOCX parsing into the document model.
//!
//! Walks `word/document.xml` as a tree, resolving hyperlink targets through
//! the relationship table and list markers through the numbering tables,
//! both built once when the parser is created.

use roxmltree::Node;

use crate::container::{DocxContainer, Relationships};
use crate::error::Result;
use crate::model::{
    Block, Cell, Document, HeadingLevel, Hyperlink, Inline, ListInfo, ListKind, Paragraph, Row,
    Table, TextRun,
};

use super::numbering::NumberingMap;

/// WordprocessingML main namespace.
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Relationship reference namespace (`r:id` attributes).
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Wordprocessing shape namespace (text boxes inside drawings).
const WPS_NS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";

/// Package entry holding the document body. Mandatory.
pub const DOCUMENT_ENTRY: &str = "word/document.xml";
/// Package entry holding hyperlink relationships. Optional.
pub const RELATIONSHIPS_ENTRY: &str = "word/_rels/document.xml.rels";
/// Package entry holding list numbering definitions. Optional.
pub const NUMBERING_ENTRY: &str = "word/numbering.xml";

/// Parser for Word (.docx) documents.
pub struct DocxParser {
    container: DocxContainer,
    relationships: Relationships,
    numbering: NumberingMap,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_container(DocxContainer::open(path)?)
    }

    /// Create a parser from in-memory package bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_container(DocxContainer::from_bytes(data)?)
    }

    /// Create a parser from a container, loading the lookup tables.
    ///
    /// Both tables are optional: an absent entry degrades to an empty table.
    /// A present but unparsable relationships entry is a fatal XML error.
    fn from_container(container: DocxContainer) -> Result<Self> {
        let relationships = match container.read_xml(RELATIONSHIPS_ENTRY) {
            Ok(xml) => Relationships::parse(&xml)?,
            Err(_) => Relationships::new(),
        };

        let numbering = match container.read_xml(NUMBERING_ENTRY) {
            Ok(xml) => NumberingMap::parse(&xml)?,
            Err(_) => NumberingMap::default(),
        };

        Ok(Self {
            container,
            relationships,
            numbering,
        })
    }

    /// Parse the document body into a model.
    ///
    /// A missing `word/document.xml` is fatal; a document without a body
    /// yields an empty model.
    pub fn parse(&self) -> Result<Document> {
        let xml = self.container.read_xml(DOCUMENT_ENTRY)?;
        let tree = roxmltree::Document::parse(&xml)?;

        let mut doc = Document::new();
        let Some(body) = tree
            .descendants()
            .find(|n| n.has_tag_name((W_NS, "body")))
        else {
            return Ok(doc);
        };

        for child in body.children().filter(Node::is_element) {
            if child.has_tag_name((W_NS, "p")) {
                doc.add_block(Block::Paragraph(
                    self.parse_paragraph(child, &self.relationships),
                ));
            } else if child.has_tag_name((W_NS, "tbl")) {
                doc.add_block(Block::Table(self.parse_table(child, &self.relationships)));
            }
            // other body-level elements (sectPr, bookmarks, ...) are ignored
        }

        Ok(doc)
    }

    /// Parse one paragraph, including nested text-box paragraphs.
    ///
    /// `rels` is the relationship table hyperlinks resolve against; nested
    /// text-box content anchored in runs is parsed with an empty table.
    fn parse_paragraph(&self, node: Node, rels: &Relationships) -> Paragraph {
        let mut para = Paragraph::new();
        para.heading = heading_level(node);
        para.list = self.list_info(node);

        for child in node.children().filter(Node::is_element) {
            if child.has_tag_name((W_NS, "r")) {
                para.inlines.push(Inline::Run(self.parse_run(child)));
            } else if child.has_tag_name((W_NS, "hyperlink")) {
                para.inlines
                    .push(Inline::Hyperlink(self.parse_hyperlink(child, rels)));
            }
        }

        // Floating shapes not anchored in any run still carry text; collect
        // every text-box paragraph beneath this one as fallback content.
        para.floating = find_path(node, &[(W_NS, "txbxContent"), (W_NS, "p")])
            .into_iter()
            .map(|p| self.parse_paragraph(p, rels))
            .collect();

        para
    }

    /// Parse one run: its own text plus any text-box paragraphs anchored in it.
    fn parse_run(&self, node: Node) -> TextRun {
        let no_rels = Relationships::new();
        let mut run = TextRun::default();

        for child in node.children().filter(Node::is_element) {
            if child.has_tag_name((W_NS, "t")) {
                run.text.push_str(child.text().unwrap_or(""));
            } else if child.has_tag_name((W_NS, "tab")) {
                run.text.push_str("    ");
            } else if child.has_tag_name((W_NS, "br")) {
                run.text.push_str("  \n");
            } else if child.has_tag_name((W_NS, "drawing")) {
                for p in find_path(
                    child,
                    &[(WPS_NS, "txbx"), (W_NS, "txbxContent"), (W_NS, "p")],
                ) {
                    run.textboxes.push(self.parse_paragraph(p, &no_rels));
                }
            } else if child.has_tag_name((W_NS, "pict")) {
                for p in find_path(child, &[(W_NS, "txbxContent"), (W_NS, "p")]) {
                    run.textboxes.push(self.parse_paragraph(p, &no_rels));
                }
            }
        }

        if let Some(rpr) = w_child(node, "rPr") {
            run.style.bold = on_off(w_child(rpr, "b"));
            run.style.italic = on_off(w_child(rpr, "i"));
        }

        run
    }

    /// Parse a hyperlink: resolved target plus its display runs.
    fn parse_hyperlink(&self, node: Node, rels: &Relationships) -> Hyperlink {
        let target = node
            .attribute((R_NS, "id"))
            .and_then(|id| rels.get(id))
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let runs = node
            .children()
            .filter(|n| n.has_tag_name((W_NS, "r")))
            .map(|r| self.parse_run(r))
            .collect();

        Hyperlink { target, runs }
    }

    /// Determine list membership from the paragraph's numbering properties.
    fn list_info(&self, node: Node) -> Option<ListInfo> {
        let numpr = w_child(w_child(node, "pPr")?, "numPr")?;

        let level = w_child(numpr, "ilvl")
            .and_then(|n| n.attribute((W_NS, "val")))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let kind = match w_child(numpr, "numId").and_then(|n| n.attribute((W_NS, "val"))) {
            Some(num_id) => self.numbering.resolve(num_id, level),
            None => ListKind::Ordered,
        };

        Some(ListInfo { kind, level })
    }

    /// Parse a table: rows of cells of paragraphs.
    fn parse_table(&self, node: Node, rels: &Relationships) -> Table {
        let mut table = Table::new();

        for tr in find_path(node, &[(W_NS, "tr")]) {
            let mut row = Row::new();
            for tc in find_path(tr, &[(W_NS, "tc")]) {
                row.cells.push(Cell {
                    paragraphs: find_path(tc, &[(W_NS, "p")])
                        .into_iter()
                        .map(|p| self.parse_paragraph(p, rels))
                        .collect(),
                });
            }
            table.rows.push(row);
        }

        table
    }
}

/// Heading level from a paragraph-style id.
///
/// Matches style ids ending in a `Heading`/`H`/`h` prefix followed by
/// digits (`Heading2`, `h3`, `MyH4`); the parsed level is clamped to 1-6.
fn heading_level(node: Node) -> HeadingLevel {
    let Some(style_id) = w_child(node, "pPr")
        .and_then(|ppr| w_child(ppr, "pStyle"))
        .and_then(|style| style.attribute((W_NS, "val")))
    else {
        return HeadingLevel::None;
    };
    heading_from_style(style_id)
}

fn heading_from_style(style_id: &str) -> HeadingLevel {
    let prefix = style_id.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &style_id[prefix.len()..];
    if digits.is_empty() {
        return HeadingLevel::None;
    }
    if !(prefix.ends_with("Heading") || prefix.ends_with('H') || prefix.ends_with('h')) {
        return HeadingLevel::None;
    }
    match digits.parse::<u32>() {
        Ok(n) => HeadingLevel::from_number(n.clamp(1, 6) as u8),
        Err(_) => HeadingLevel::None,
    }
}

/// First direct child element with the given WordprocessingML local name.
fn w_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.has_tag_name((W_NS, name)))
}

/// Toggle-property state: present counts as on unless `w:val` turns it off.
fn on_off(node: Option<Node>) -> bool {
    match node {
        None => false,
        Some(n) => !matches!(n.attribute((W_NS, "val")), Some("0") | Some("false")),
    }
}

/// Collect all descendants reached by following `path`, where every step is
/// a descendant (not direct-child) search, in document order.
fn find_path<'a, 'i>(root: Node<'a, 'i>, path: &[(&str, &str)]) -> Vec<Node<'a, 'i>> {
    let Some((&(ns, name), rest)) = path.split_first() else {
        return vec![root];
    };

    let mut found = Vec::new();
    for node in root
        .descendants()
        .filter(|n| n.has_tag_name((ns, name)))
    {
        if rest.is_empty() {
            found.push(node);
        } else {
            found.extend(find_path(node, rest));
        }
    }
    found
}
