//! End-to-end substitution pipeline: load config → build index → load
//! document → substitute → save.
//!
//! The stages are strictly linear; any failure aborts the run before the
//! output file is created, so there is no partial-success state.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use docfill_docx::Document;
use docfill_shared::{Result, load_substitutions};

use crate::keyword::KeywordIndex;
use crate::walker::{Mode, substitute_document};

/// Prefix of the derived output file name.
const OUTPUT_PREFIX: &str = "modified_";

/// Configuration for one substitution run.
#[derive(Debug, Clone)]
pub struct SubstituteConfig {
    /// Path to the input Word document.
    pub document_path: PathBuf,
    /// Path to the JSON substitution config.
    pub config_path: PathBuf,
    /// Traversal mode.
    pub mode: Mode,
}

/// Result of a completed substitution run.
#[derive(Debug, Clone)]
pub struct SubstituteResult {
    /// Where the modified document was written.
    pub output_path: PathBuf,
    /// Keywords in the index.
    pub keywords: usize,
    /// Tables visited.
    pub tables: usize,
    /// Cell paragraphs rewritten.
    pub paragraphs: usize,
    /// Tokens replaced.
    pub replacements: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Run the full substitution pipeline.
pub fn substitute(config: &SubstituteConfig) -> Result<SubstituteResult> {
    let start = Instant::now();

    info!(
        document = %config.document_path.display(),
        config = %config.config_path.display(),
        mode = ?config.mode,
        "starting substitution pipeline"
    );

    let mapping = load_substitutions(&config.config_path)?;
    let index = KeywordIndex::from_config(&mapping);
    debug!(keywords = index.len(), "keyword index built");

    let mut document = Document::open(&config.document_path)?;

    let stats = substitute_document(&mut document, &index, config.mode);

    let output_path = derive_output_path(&config.document_path);
    document.save(&output_path)?;

    let result = SubstituteResult {
        output_path,
        keywords: index.len(),
        tables: stats.tables,
        paragraphs: stats.paragraphs,
        replacements: stats.replacements,
        elapsed: start.elapsed(),
    };

    info!(
        output = %result.output_path.display(),
        replacements = result.replacements,
        elapsed_ms = result.elapsed.as_millis(),
        "substitution pipeline complete"
    );

    Ok(result)
}

/// Derive the output path: the input file name prefixed with `modified_`, in
/// the same directory as the input. An existing file at that path is
/// overwritten silently.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let modified = format!("{OUTPUT_PREFIX}{name}");
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(modified),
        _ => PathBuf::from(modified),
    }
}
