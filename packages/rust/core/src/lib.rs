//! Keyword substitution core: index, paragraph rewriter, table walker, and
//! the end-to-end pipeline.

pub mod keyword;
pub mod pipeline;
pub mod rewrite;
pub mod walker;

pub use keyword::KeywordIndex;
pub use pipeline::{SubstituteConfig, SubstituteResult, substitute};
pub use rewrite::{ParagraphRewrite, rewrite_paragraph};
pub use walker::{Mode, WalkStats, substitute_document};
