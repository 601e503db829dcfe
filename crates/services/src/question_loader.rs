//! Question-bank ingestion.
//!
//! Question sets arrive as a JSON array of flat records; every record is
//! validated into a typed [`Question`](quiz_core::model::Question) before
//! the bank is handed out, so malformed data dies here instead of at some
//! later use site.

use std::fs;
use std::path::Path;

use quiz_core::QuestionBank;
use quiz_core::model::{ClusterLimits, QuestionDraft};

use crate::error::LoadError;

/// Load and validate a question bank from a JSON file.
///
/// # Errors
///
/// Returns `LoadError` when the file cannot be read, is not valid JSON, or
/// contains a record that fails validation.
pub fn load_question_bank(
    path: impl AsRef<Path>,
    limits: ClusterLimits,
) -> Result<QuestionBank, LoadError> {
    let raw = fs::read_to_string(path)?;
    question_bank_from_json(&raw, limits)
}

/// Build a question bank from JSON already in memory.
///
/// # Errors
///
/// Returns `LoadError` for invalid JSON or a record that fails validation.
pub fn question_bank_from_json(
    raw: &str,
    limits: ClusterLimits,
) -> Result<QuestionBank, LoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(raw)?;
    Ok(QuestionBank::from_drafts(drafts, limits)?)
}
