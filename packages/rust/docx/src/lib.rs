//! Minimal DOCX package layer for docfill.
//!
//! A `.docx` file is a ZIP archive; the main content lives in
//! `word/document.xml`. This crate exposes the document as the mutable tree
//! `tables → rows → cells → paragraphs → text` and supports loading from and
//! saving to a file path. It deliberately models nothing else: styles,
//! numbering, headers, images and all other package parts are carried through
//! byte-for-byte on save.
//!
//! Paragraph formatting (`w:pPr`) survives a rewrite; run-level formatting
//! inside a rewritten paragraph does not, since the paragraph text is written
//! back as a single run.

mod reader;
mod writer;

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::write::SimpleFileOptions;

use docfill_shared::{DocfillError, Result};

/// ZIP entry name of the main document part.
const DOCUMENT_PART: &str = "word/document.xml";

/// One retained ZIP entry of the package.
#[derive(Debug)]
struct Part {
    name: String,
    data: Vec<u8>,
}

/// A loaded DOCX document: the raw package plus the parsed table tree.
#[derive(Debug)]
pub struct Document {
    parts: Vec<Part>,
    tables: Vec<Table>,
}

/// A top-level table in the document body.
///
/// Tables nested inside cells are not modeled; their content is preserved
/// untouched on save.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

/// A table row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell; each cell can hold multiple paragraphs with different
/// formatting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph inside a table cell, holding the concatenated text of its
/// `w:t` elements.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
}

impl Paragraph {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    /// The paragraph's current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the paragraph's text. Applied to the package on [`Document::save`].
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Document {
    /// Load a DOCX file from disk.
    ///
    /// A missing file is [`DocfillError::DocumentNotFound`]; anything that is
    /// not a readable DOCX package (not a ZIP, missing `word/document.xml`,
    /// broken XML) is [`DocfillError::DocumentMalformed`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocfillError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }

        let data = std::fs::read(path).map_err(|e| DocfillError::io(path, e))?;
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| DocfillError::document_malformed(path, format!("not a ZIP archive: {e}")))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| {
                DocfillError::document_malformed(path, format!("broken ZIP entry: {e}"))
            })?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data).map_err(|e| {
                DocfillError::document_malformed(path, format!("broken ZIP entry: {e}"))
            })?;
            parts.push(Part {
                name: entry.name().to_string(),
                data,
            });
        }

        let xml = parts
            .iter()
            .find(|p| p.name == DOCUMENT_PART)
            .ok_or_else(|| {
                DocfillError::document_malformed(path, format!("missing {DOCUMENT_PART} part"))
            })?;

        let tables = reader::parse_tables(&xml.data)
            .map_err(|msg| DocfillError::document_malformed(path, msg))?;

        tracing::debug!(
            path = %path.display(),
            parts = parts.len(),
            tables = tables.len(),
            "document loaded"
        );

        Ok(Self { parts, tables })
    }

    /// The document's top-level tables, in document order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Mutable access to the table tree.
    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    /// Serialize the document to `path`, overwriting silently if it exists.
    ///
    /// `word/document.xml` is re-emitted with every table-cell paragraph's
    /// current text spliced in; every other package part is copied verbatim.
    pub fn save(&self, path: &Path) -> Result<()> {
        let texts: Vec<&str> = self
            .tables
            .iter()
            .flat_map(|t| &t.rows)
            .flat_map(|r| &r.cells)
            .flat_map(|c| &c.paragraphs)
            .map(|p| p.text())
            .collect();

        let xml = self
            .parts
            .iter()
            .find(|p| p.name == DOCUMENT_PART)
            .ok_or_else(|| {
                DocfillError::document_malformed(path, format!("missing {DOCUMENT_PART} part"))
            })?;

        let new_xml = writer::rewrite_document_xml(&xml.data, &texts)
            .map_err(|msg| DocfillError::document_malformed(path, msg))?;

        let file = File::create(path).map_err(|e| DocfillError::io(path, e))?;
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for part in &self.parts {
            zip.start_file(part.name.as_str(), options.clone())
                .map_err(|e| DocfillError::io(path, e.into()))?;
            let data = if part.name == DOCUMENT_PART {
                &new_xml
            } else {
                &part.data
            };
            std::io::Write::write_all(&mut zip, data).map_err(|e| DocfillError::io(path, e))?;
        }
        zip.finish().map_err(|e| DocfillError::io(path, e.into()))?;

        tracing::debug!(path = %path.display(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tr><w:tc><w:p><w:pPr><w:jc w:val="both"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Dear </w:t></w:r><w:r><w:t>FIRSTNAME_MAIN_TENANT,</w:t></w:r></w:p><w:p/></w:tc><w:tc><w:p><w:r><w:t xml:space="preserve">rent: RENT_AMOUNT euros</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Body text outside tables stays put.</w:t></w:r></w:p></w:body></w:document>"#;

    fn write_fixture(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("letter.docx");
        let file = File::create(&path).expect("create fixture");
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
            ),
            ("word/document.xml", DOCUMENT_XML),
        ] {
            zip.start_file(name, options.clone()).expect("start entry");
            zip.write_all(content.as_bytes()).expect("write entry");
        }
        zip.finish().expect("finish fixture");
        path
    }

    #[test]
    fn open_parses_table_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = Document::open(&write_fixture(dir.path())).expect("open");

        assert_eq!(doc.tables().len(), 1);
        let row = &doc.tables()[0].rows[0];
        assert_eq!(row.cells.len(), 2);
        // Text runs are concatenated, including the empty trailing paragraph.
        assert_eq!(row.cells[0].paragraphs[0].text(), "Dear FIRSTNAME_MAIN_TENANT,");
        assert_eq!(row.cells[0].paragraphs[1].text(), "");
        assert_eq!(row.cells[1].paragraphs[0].text(), "rent: RENT_AMOUNT euros");
    }

    #[test]
    fn open_missing_file_is_document_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Document::open(&dir.path().join("absent.docx")).unwrap_err();
        assert!(matches!(err, DocfillError::DocumentNotFound { .. }));
    }

    #[test]
    fn open_junk_bytes_is_document_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("junk.docx");
        std::fs::write(&path, b"definitely not a zip archive").expect("write");
        let err = Document::open(&path).unwrap_err();
        assert!(matches!(err, DocfillError::DocumentMalformed { .. }));
    }

    #[test]
    fn open_zip_without_document_part_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.docx");
        let file = File::create(&path).expect("create");
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("hello.txt", SimpleFileOptions::default())
            .expect("start");
        zip.write_all(b"hi").expect("write");
        zip.finish().expect("finish");

        let err = Document::open(&path).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn save_round_trips_edited_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut doc = Document::open(&write_fixture(dir.path())).expect("open");

        doc.tables_mut()[0].rows[0].cells[0].paragraphs[0].set_text("Dear Max,");
        let out = dir.path().join("edited.docx");
        doc.save(&out).expect("save");

        let reread = Document::open(&out).expect("reopen");
        let row = &reread.tables()[0].rows[0];
        assert_eq!(row.cells[0].paragraphs[0].text(), "Dear Max,");
        assert_eq!(row.cells[0].paragraphs[1].text(), "");
        // Untouched cell survives the rewrite.
        assert_eq!(row.cells[1].paragraphs[0].text(), "rent: RENT_AMOUNT euros");
    }

    #[test]
    fn save_preserves_non_table_content_and_parts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = Document::open(&write_fixture(dir.path())).expect("open");
        let out = dir.path().join("copy.docx");
        doc.save(&out).expect("save");

        let data = std::fs::read(&out).expect("read output");
        let mut archive = ZipArchive::new(Cursor::new(data)).expect("zip");

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .expect("document part")
            .read_to_string(&mut xml)
            .expect("read xml");
        assert!(xml.contains("Body text outside tables stays put."));
        // Paragraph properties survive the rewrite.
        assert!(xml.contains("w:jc"));

        let mut rels = String::new();
        archive
            .by_name("_rels/.rels")
            .expect("rels part")
            .read_to_string(&mut rels)
            .expect("read rels");
        assert!(rels.contains("officeDocument"));
    }

    #[test]
    fn save_escapes_xml_special_characters() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut doc = Document::open(&write_fixture(dir.path())).expect("open");

        doc.tables_mut()[0].rows[0].cells[0].paragraphs[0].set_text("Müller & Söhne <GmbH>");
        let out = dir.path().join("escaped.docx");
        doc.save(&out).expect("save");

        let reread = Document::open(&out).expect("reopen");
        assert_eq!(
            reread.tables()[0].rows[0].cells[0].paragraphs[0].text(),
            "Müller & Söhne <GmbH>"
        );
    }
}
