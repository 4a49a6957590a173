//! Shared helpers for turning loosely-shaped request fields into validated values.

use std::collections::HashSet;

use serde::Deserialize;

use crate::errors::AppError;

/// Skills arrive either as a JSON array or as a comma-separated form field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping the
/// first spelling seen.
pub fn normalize_skills(input: Option<SkillsInput>) -> Vec<String> {
    let raw: Vec<String> = match input {
        None => return Vec::new(),
        Some(SkillsInput::List(items)) => items,
        Some(SkillsInput::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Blank strings become `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn require_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    normalize_optional(value).ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
