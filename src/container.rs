//! ZIP package abstraction and hyperlink relationship table.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Hyperlink relationship table parsed from a `.rels` entry.
///
/// Maps a relationship id (e.g. `rId4`) to its target string. Only
/// relationships with a non-empty id and target are kept; everything the
/// renderer does not consult is discarded at parse time.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    targets: HashMap<String, String>,
}

impl Relationships {
    /// Create an empty relationship table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationships entry.
    ///
    /// Unrecognized elements and relationships missing an `Id` or `Target`
    /// attribute are ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut rels = Relationships::new();

        if xml.trim().is_empty() {
            return Ok(rels);
        }

        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e))
                | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !target.is_empty() {
                        rels.targets.insert(id, target);
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Look up the target for a relationship id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    /// Number of relationships in the table.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the table holds no relationships.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// ZIP container abstraction over a Word document package.
///
/// Provides by-path access to the package's XML entries. The whole archive
/// is held in memory for the duration of one conversion.
pub struct DocxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl DocxContainer {
    /// Open a document package from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML entry from the package as a string.
    ///
    /// Handles UTF-8 (with or without BOM) and UTF-16 LE/BE (with BOM).
    /// A missing entry yields [`Error::MissingEntry`].
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingEntry(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        decode_xml_bytes(&bytes)
    }

    /// Check if an entry exists in the package.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }
}

impl std::fmt::Debug for DocxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxContainer")
            .field("entries", &self.archive.borrow().len())
            .finish()
    }
}

/// Decode XML entry bytes, honoring a leading byte-order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::XmlParse(e.to_string()));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return Ok(fix_encoding_declaration(&decode_utf16(rest, u16::from_le_bytes)?));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return Ok(fix_encoding_declaration(&decode_utf16(rest, u16::from_be_bytes)?));
    }
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::XmlParse(e.to_string()))
}

fn decode_utf16(bytes: &[u8], from_bytes: impl Fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(e.to_string()))
}

/// Rewrite a UTF-16 encoding declaration after transcoding to UTF-8, so the
/// XML parser does not re-interpret the already-decoded text.
fn fix_encoding_declaration(content: &str) -> String {
    let Some(end) = content.find("?>") else {
        return content.to_string();
    };
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let (decl, rest) = content.split_at(end + 2);
    let fixed = decl
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");
    format!("{}{}", fixed, rest)
}
