//! Numbering (list) definition parsing and resolution.

use crate::error::Result;
use crate::model::ListKind;
use std::collections::HashMap;

/// Numbering lookup tables built from `word/numbering.xml`.
///
/// Resolution is a two-stage indirection: a paragraph's `numId` names a
/// concrete list instance, the instance names an abstract definition, and
/// the abstract definition carries one number format per indent level.
#[derive(Debug, Clone, Default)]
pub struct NumberingMap {
    /// numId -> abstractNumId
    instances: HashMap<String, String>,
    /// abstractNumId -> (indent level -> number format string)
    abstract_levels: HashMap<String, HashMap<u8, String>>,
}

impl NumberingMap {
    /// Parse numbering definitions from XML content.
    ///
    /// Collection is tolerant: a malformed region stops further collection
    /// but everything parsed up to that point is kept, so one broken list
    /// definition cannot block conversion of the rest of the document.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut map = NumberingMap::default();
        map.parse_abstract_definitions(xml);
        map.parse_instances(xml);
        Ok(map)
    }

    /// Resolve a paragraph's list marker kind.
    ///
    /// A miss at either lookup stage, or an unknown indent level, falls back
    /// to the default ordered (decimal) format.
    pub fn resolve(&self, num_id: &str, level: u8) -> ListKind {
        let fmt = self
            .instances
            .get(num_id)
            .and_then(|abstract_id| self.abstract_levels.get(abstract_id))
            .and_then(|levels| levels.get(&level));

        match fmt.map(String::as_str) {
            Some("bullet") => ListKind::Bullet,
            _ => ListKind::Ordered,
        }
    }

    /// Whether any definitions were collected.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty() && self.abstract_levels.is_empty()
    }

    /// First pass: `w:abstractNum` definitions with their per-level formats.
    fn parse_abstract_definitions(&mut self, xml: &str) {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_abstract: Option<(String, HashMap<u8, String>)> = None;
        let mut current_level: Option<(u8, String)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(e)) => match e.name().as_ref() {
                    b"w:abstractNum" => {
                        if let Some(id) = get_w_attr(&e, b"w:abstractNumId") {
                            current_abstract = Some((id, HashMap::new()));
                        }
                    }
                    b"w:lvl" if current_abstract.is_some() => {
                        let ilvl = get_w_attr(&e, b"w:ilvl")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        current_level = Some((ilvl, "decimal".to_string()));
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(e)) => {
                    if e.name().as_ref() == b"w:numFmt" {
                        if let Some((_, fmt)) = current_level.as_mut() {
                            if let Some(val) = get_w_attr(&e, b"w:val") {
                                *fmt = val;
                            }
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => match e.name().as_ref() {
                    b"w:lvl" => {
                        if let (Some((_, levels)), Some((ilvl, fmt))) =
                            (current_abstract.as_mut(), current_level.take())
                        {
                            levels.insert(ilvl, fmt);
                        }
                    }
                    b"w:abstractNum" => {
                        if let Some((id, levels)) = current_abstract.take() {
                            self.abstract_levels.insert(id, levels);
                        }
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(_) => break,
                _ => {}
            }
            buf.clear();
        }
    }

    /// Second pass: `w:num` instances referencing abstract definitions.
    fn parse_instances(&mut self, xml: &str) {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_num_id: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(e)) => {
                    if e.name().as_ref() == b"w:num" {
                        current_num_id = get_w_attr(&e, b"w:numId");
                    }
                }
                Ok(quick_xml::events::Event::Empty(e)) => {
                    if e.name().as_ref() == b"w:abstractNumId" {
                        if let (Some(num_id), Some(abstract_id)) =
                            (current_num_id.as_ref(), get_w_attr(&e, b"w:val"))
                        {
                            self.instances.insert(num_id.clone(), abstract_id);
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => {
                    if e.name().as_ref() == b"w:num" {
                        current_num_id = None;
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(_) => break,
                _ => {}
            }
            buf.clear();
        }
    }
}

/// Helper to get an attribute value by qualified name.
fn get_w_attr(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}
