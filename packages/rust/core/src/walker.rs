//! Document traversal: walk every table cell paragraph and apply the
//! rewriter.

use std::str::FromStr;

use tracing::{debug, warn};

use docfill_docx::Document;
use docfill_shared::DocfillError;

use crate::keyword::KeywordIndex;
use crate::rewrite::rewrite_paragraph;

/// Traversal mode for keyword substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Walk every table, row, cell, and paragraph in document order.
    Table,
    /// Substitution in body paragraphs outside of tables. Declared but
    /// intentionally unimplemented; a no-op.
    Paragraph,
}

impl FromStr for Mode {
    type Err = DocfillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Mode::Table),
            "paragraph" => Ok(Mode::Paragraph),
            other => Err(DocfillError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Counters accumulated during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Tables visited.
    pub tables: usize,
    /// Cell paragraphs rewritten.
    pub paragraphs: usize,
    /// Tokens replaced across all paragraphs.
    pub replacements: usize,
}

/// Substitute keywords throughout `doc` according to `mode`.
///
/// In table mode each cell paragraph's text is run through the rewriter and
/// written back into the paragraph; editing at paragraph granularity keeps
/// paragraph-level formatting intact (rewriting whole cells would not).
pub fn substitute_document(doc: &mut Document, index: &KeywordIndex, mode: Mode) -> WalkStats {
    match mode {
        Mode::Table => walk_tables(doc, index),
        Mode::Paragraph => {
            warn!("paragraph mode is not implemented; document left unchanged");
            WalkStats::default()
        }
    }
}

fn walk_tables(doc: &mut Document, index: &KeywordIndex) -> WalkStats {
    let mut stats = WalkStats::default();
    for table in doc.tables_mut() {
        stats.tables += 1;
        for row in &mut table.rows {
            for cell in &mut row.cells {
                for paragraph in &mut cell.paragraphs {
                    let rewrite = rewrite_paragraph(index, paragraph.text());
                    stats.paragraphs += 1;
                    stats.replacements += rewrite.replacements;
                    paragraph.set_text(rewrite.text);
                }
            }
        }
    }
    debug!(
        tables = stats.tables,
        paragraphs = stats.paragraphs,
        replacements = stats.replacements,
        "table walk complete"
    );
    stats
}
