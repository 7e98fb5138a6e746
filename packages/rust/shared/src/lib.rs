//! Shared types, error model, and configuration for docfill.
//!
//! This crate is the foundation depended on by all other docfill crates.
//! It provides:
//! - [`DocfillError`] — the unified error type
//! - The substitution config model ([`SubstitutionConfig`], [`KeywordEntry`])
//!   and its JSON loader

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{KeywordEntry, SubstitutionConfig, load_substitutions};
pub use error::{DocfillError, Result};
