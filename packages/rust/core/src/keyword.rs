//! Flattened keyword index and substring lookup.
//!
//! The two-level config mapping is flattened once at load time into an
//! ordered sequence of (keyword, value) pairs; each token lookup is then a
//! single linear scan instead of a nested-mapping traversal.

use docfill_shared::SubstitutionConfig;

/// Ordered (keyword, value) pairs derived from the substitution config.
///
/// Ephemeral: built per run, never persisted.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    keyword: String,
    value: String,
}

impl KeywordIndex {
    /// Flatten the config in map iteration order (object, then property).
    ///
    /// If several keywords could match the same token, the first entry in
    /// this order wins; no semantic precedence is defined. Entries with an
    /// empty keyword would match every token and are skipped.
    pub fn from_config(config: &SubstitutionConfig) -> Self {
        let mut entries = Vec::new();
        for (object, properties) in config {
            for (property, entry) in properties {
                if entry.keyword.is_empty() {
                    tracing::warn!(
                        object = %object,
                        property = %property,
                        "skipping entry with empty keyword"
                    );
                    continue;
                }
                entries.push(IndexEntry {
                    keyword: entry.keyword.clone(),
                    value: entry.value.clone(),
                });
            }
        }
        Self { entries }
    }

    /// Return the replacement value for the first keyword contained in
    /// `token`, or `None` if no keyword matches.
    ///
    /// Matching is substring-based, not whole-token, so tokens with trailing
    /// punctuation ("SURNAME," or "ADDRESS:") still match. `None` is the
    /// no-replacement sentinel and is distinct from an empty-string value.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| token.contains(e.keyword.as_str()))
            .map(|e| e.value.as_str())
    }

    /// Number of indexed keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no keywords at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
