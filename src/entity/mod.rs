//! Safe navigation over JSON release documents.
//!
//! Missing keys, out-of-range indexes and JSON `null` all read as absence.
//! A value that is present but has the wrong shape is an error.

pub mod path;
pub mod record;

pub use path::{FieldPath, Segment};
pub use record::Record;

use crate::utils::error::{IntegrationError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    let next = match (segment, value) {
        (Segment::Key(key), Value::Object(map)) => map.get(key)?,
        (Segment::Index(index), Value::Array(items)) => {
            let position = if *index < 0 {
                items.len().checked_sub(index.unsigned_abs())?
            } else {
                *index as usize
            };
            items.get(position)?
        }
        _ => return None,
    };

    if next.is_null() {
        None
    } else {
        Some(next)
    }
}

/// Follows a single-valued path. Wildcard paths always yield `None`, use
/// [`lookup_all`] for those.
pub fn lookup<'a>(value: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    if path.has_wildcard() || value.is_null() {
        return None;
    }

    path.segments()
        .iter()
        .try_fold(value, |current, segment| step(current, segment))
}

/// Collects every non-null match of `path`, expanding `[*]` in document order.
pub fn lookup_all<'a>(value: &'a Value, path: &FieldPath) -> Vec<&'a Value> {
    let mut current: Vec<&Value> = if value.is_null() { vec![] } else { vec![value] };

    for segment in path.segments() {
        current = match segment {
            Segment::Wildcard => current
                .into_iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter(|v| !v.is_null())
                .collect(),
            _ => current
                .into_iter()
                .filter_map(|v| step(v, segment))
                .collect(),
        };

        if current.is_empty() {
            break;
        }
    }

    current
}

/// Reads `path` and deserializes it into `T`.
///
/// Returns `Ok(None)` when the field is absent, `InvalidTypeError` when it is
/// present but cannot be read as `T`.
pub fn field<T: DeserializeOwned>(value: &Value, path: &str) -> Result<Option<T>> {
    let parsed: FieldPath = path.parse()?;
    let Some(found) = lookup(value, &parsed) else {
        return Ok(None);
    };

    serde_json::from_value(found.clone())
        .map(Some)
        .map_err(|e| IntegrationError::InvalidTypeError {
            path: parsed.to_string(),
            message: e.to_string(),
        })
}

/// Like [`field`], but absence is reported as `MissingFieldError`.
pub fn require<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T> {
    field(value, path)?.ok_or_else(|| IntegrationError::MissingFieldError {
        path: path.trim().to_string(),
    })
}
