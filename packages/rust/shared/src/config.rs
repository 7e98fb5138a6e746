//! Substitution configuration for docfill.
//!
//! The config is a JSON file with a two-level mapping of object name →
//! property name → keyword/value pair:
//!
//! ```json
//! {
//!   "main_tenant": {
//!     "firstname": { "keyword": "FIRSTNAME_MAIN_TENANT", "value": "Max" }
//!   }
//! }
//! ```
//!
//! It is loaded once per run and treated as read-only.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocfillError, Result};

/// One keyword/value pair configured under `object.property`.
///
/// `keyword` is the literal token searched for in document text; `value`
/// replaces any token containing it. Exactly these two fields are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordEntry {
    /// Literal token to search for inside document text.
    pub keyword: String,
    /// Replacement string for any token matching the keyword.
    pub value: String,
}

/// The full two-level mapping: object name → property name → entry.
///
/// Keyword strings should be unique across the whole config in practice;
/// lookups return the first match in index order and duplicates have no
/// defined precedence.
pub type SubstitutionConfig = BTreeMap<String, BTreeMap<String, KeywordEntry>>;

/// Load the substitution config from a JSON file.
///
/// A missing file is [`DocfillError::ConfigNotFound`]; content that does not
/// parse as the expected structure is [`DocfillError::ConfigMalformed`].
pub fn load_substitutions(path: &Path) -> Result<SubstitutionConfig> {
    if !path.exists() {
        return Err(DocfillError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| DocfillError::io(path, e))?;

    let config: SubstitutionConfig =
        serde_json::from_str(&content).map_err(|e| DocfillError::ConfigMalformed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(
        path = %path.display(),
        objects = config.len(),
        "substitution config loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
      "main_tenant": {
        "firstname": { "keyword": "FIRSTNAME_MAIN_TENANT", "value": "Max" },
        "surname": { "keyword": "SURNAME_MAIN_TENANT", "value": "Mustermann" }
      },
      "flat": {
        "address": { "keyword": "ADDRESS_FLAT", "value": "Hauptstrasse 1" }
      }
    }"#;

    #[test]
    fn parses_two_level_mapping() {
        let config: SubstitutionConfig = serde_json::from_str(SAMPLE).expect("parse");
        assert_eq!(config.len(), 2);
        assert_eq!(
            config["main_tenant"]["firstname"],
            KeywordEntry {
                keyword: "FIRSTNAME_MAIN_TENANT".into(),
                value: "Max".into(),
            }
        );
        assert_eq!(config["flat"]["address"].value, "Hauptstrasse 1");
    }

    #[test]
    fn rejects_extra_fields() {
        let json = r#"{"a": {"b": {"keyword": "K", "value": "V", "note": "x"}}}"#;
        assert!(serde_json::from_str::<SubstitutionConfig>(json).is_err());
    }

    #[test]
    fn rejects_missing_value_field() {
        let json = r#"{"a": {"b": {"keyword": "K"}}}"#;
        assert!(serde_json::from_str::<SubstitutionConfig>(json).is_err());
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.json");
        let err = load_substitutions(&path).unwrap_err();
        assert!(matches!(err, DocfillError::ConfigNotFound { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn malformed_json_is_config_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").expect("write");
        let err = load_substitutions(&path).unwrap_err();
        assert!(matches!(err, DocfillError::ConfigMalformed { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).expect("write");
        let config = load_substitutions(&path).expect("load");
        assert_eq!(config["main_tenant"]["surname"].value, "Mustermann");
    }
}
