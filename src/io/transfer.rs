// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Lesson import and export.
//!
//! Exports write the whole saved collection as a JSON (or YAML) array.
//! Imports accept the same shape, check its structure, and append the
//! lessons whose ids are not already saved.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::lesson::Lesson;

/// Failure of an import or export.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("No lessons to export")]
    NothingToExport,
    #[error("Unsupported file extension: {0:?}")]
    UnsupportedFormat(Option<String>),
    #[error("Could not parse file: {0}")]
    Parse(String),
    #[error("Invalid file format: Expected array of lessons")]
    NotASequence,
    #[error("Invalid lesson structure at entry {index}: {reason}")]
    InvalidLesson { index: usize, reason: String },
    #[error("Could not serialize lessons: {0}")]
    Serialize(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Json,
    Yaml,
}

impl TransferFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, TransferError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(TransferFormat::Json),
            Some("yaml") | Some("yml") => Ok(TransferFormat::Yaml),
            _ => Err(TransferError::UnsupportedFormat(extension)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Yaml => "yaml",
        }
    }
}

/// Result of merging an imported file into the saved collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub merged: Vec<Lesson>,
    pub imported_count: usize,
}

/// Suggested name of an export written on `date`.
pub fn export_file_name(date: NaiveDate, format: TransferFormat) -> String {
    format!(
        "reflex_lessons_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Serialize the collection verbatim.
pub fn export_all(collection: &[Lesson], format: TransferFormat) -> Result<String, TransferError> {
    if collection.is_empty() {
        return Err(TransferError::NothingToExport);
    }
    match format {
        TransferFormat::Json => serde_json::to_string_pretty(collection)
            .map_err(|e| TransferError::Serialize(e.to_string())),
        TransferFormat::Yaml => {
            serde_yaml::to_string(collection).map_err(|e| TransferError::Serialize(e.to_string()))
        }
    }
}

/// Export to `path`, choosing the format from its extension.
///
/// Returns the number of lessons written.
pub fn export_to_path(collection: &[Lesson], path: &Path) -> Result<usize, TransferError> {
    let format = TransferFormat::from_path(path)?;
    let blob = export_all(collection, format)?;
    std::fs::write(path, blob)?;
    Ok(collection.len())
}

/// Parse `raw` and append its lessons that are not already in `existing`.
pub fn import_blob(
    raw: &str,
    format: TransferFormat,
    existing: &[Lesson],
) -> Result<ImportOutcome, TransferError> {
    let incoming = parse_lessons(raw, format)?;

    let mut known: HashSet<String> = existing.iter().map(|l| l.id.clone()).collect();
    let mut merged = existing.to_vec();
    let mut imported_count = 0;
    for lesson in incoming {
        if known.insert(lesson.id.clone()) {
            merged.push(lesson);
            imported_count += 1;
        } else {
            log::debug!("Skipping lesson {:?}: id already saved", lesson.id);
        }
    }

    Ok(ImportOutcome {
        merged,
        imported_count,
    })
}

/// Parse and structurally validate an exported collection.
pub fn parse_lessons(raw: &str, format: TransferFormat) -> Result<Vec<Lesson>, TransferError> {
    let value: Value = match format {
        TransferFormat::Json => {
            serde_json::from_str(raw).map_err(|e| TransferError::Parse(e.to_string()))?
        }
        TransferFormat::Yaml => {
            serde_yaml::from_str(raw).map_err(|e| TransferError::Parse(e.to_string()))?
        }
    };

    let Value::Array(entries) = value else {
        return Err(TransferError::NotASequence);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| validate_lesson(index, entry))
        .collect()
}

fn validate_lesson(index: usize, entry: Value) -> Result<Lesson, TransferError> {
    let invalid = |reason: &str| TransferError::InvalidLesson {
        index,
        reason: reason.to_string(),
    };

    let Value::Object(mut fields) = entry else {
        return Err(invalid("not an object"));
    };

    // Older exports used numeric ids
    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => return Err(invalid("missing id")),
    };
    fields.insert("id".to_string(), Value::String(id));

    match fields.get("name") {
        Some(Value::String(s)) if !s.is_empty() => {}
        _ => return Err(invalid("missing name")),
    }
    let Some(Value::Array(steps)) = fields.get_mut("steps") else {
        return Err(invalid("steps is not a list"));
    };
    let before = steps.len();
    steps.retain(Value::is_object);
    if steps.len() < before {
        log::warn!(
            "Dropped {} malformed slide(s) from imported lesson {}",
            before - steps.len(),
            index
        );
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| invalid(&e.to_string()))
}
