use serde_json::Value;
use thiserror::Error;

use crate::layout::{LayoutConfig, LayoutError, compute_layout};
use crate::model::{ExperienceRecord, LayoutResult, YearMonth};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an array of experiences, or an object with an \"experiences\" or \"data\" array")]
    UnexpectedShape,
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Parse the experience list served by the profile backend.
///
/// Accepted shapes:
/// 1. a bare array (`GET /api/experiences`),
/// 2. an object with an `experiences` array (a full profile export),
/// 3. an object with a `data` array (a wrapped API response).
///
/// Duplicate skills within a record are dropped, keeping the first.
pub fn parse_experiences(data: &[u8]) -> Result<Vec<ExperienceRecord>, LoadError> {
    let value: Value = serde_json::from_slice(data)?;
    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut obj) => match obj.remove("experiences").or_else(|| obj.remove("data")) {
            Some(list @ Value::Array(_)) => list,
            _ => return Err(LoadError::UnexpectedShape),
        },
        _ => return Err(LoadError::UnexpectedShape),
    };

    let mut records: Vec<ExperienceRecord> = serde_json::from_value(list)?;
    for record in &mut records {
        dedup_skills(record);
    }
    tracing::debug!(count = records.len(), "loaded experience records");
    Ok(records)
}

/// Parse and lay out in one step.
pub fn load_layout(
    data: &[u8],
    now: YearMonth,
    config: &LayoutConfig,
) -> Result<LayoutResult, LoadError> {
    let records = parse_experiences(data)?;
    Ok(compute_layout(&records, now, config)?)
}

fn dedup_skills(record: &mut ExperienceRecord) {
    let before = record.skills.len();
    let mut seen = Vec::with_capacity(before);
    record.skills.retain(|skill| {
        if seen.contains(skill) {
            false
        } else {
            seen.push(skill.clone());
            true
        }
    });
    if record.skills.len() != before {
        tracing::warn!(id = %record.id, dropped = before - record.skills.len(), "duplicate skills");
    }
}
