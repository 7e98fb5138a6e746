//! Token-level paragraph rewriting.

use tracing::info;

use crate::keyword::KeywordIndex;

/// Outcome of rewriting one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphRewrite {
    /// The fully reconstructed paragraph text.
    pub text: String,
    /// How many tokens were replaced.
    pub replacements: usize,
}

/// Split `text` into whitespace-delimited tokens, replace every token that
/// contains a configured keyword with its value, and rejoin with single
/// spaces.
///
/// Tokens without a match pass through unchanged. Runs of spaces and tabs are
/// not preserved. Each replacement is logged at info level.
pub fn rewrite_paragraph(index: &KeywordIndex, text: &str) -> ParagraphRewrite {
    let mut replacements = 0;
    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(|token| match index.lookup(token) {
            Some(value) => {
                info!(token, value, "replacing keyword");
                replacements += 1;
                value
            }
            None => token,
        })
        .collect();

    ParagraphRewrite {
        text: tokens.join(" "),
        replacements,
    }
}
