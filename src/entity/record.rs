use super::{lookup, lookup_all, FieldPath};
use crate::utils::error::{IntegrationError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A flattened entity built from a source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    /// 依照 field mapping (來源路徑 -> 目標欄位) 建立記錄，缺少的路徑直接略過
    ///
    /// Source paths are applied in sorted order, so a target shared by several
    /// paths always ends up with the same value.
    pub fn from_mapping(source: &Value, mapping: &HashMap<String, String>) -> Result<Self> {
        let mut data = HashMap::new();

        let mut entries: Vec<(&String, &String)> = mapping.iter().collect();
        entries.sort();

        for (source_path, target_key) in entries {
            let path: FieldPath = source_path.parse()?;

            let mapped = if path.has_wildcard() {
                let matches = lookup_all(source, &path);
                if matches.is_empty() {
                    None
                } else {
                    Some(Value::Array(matches.into_iter().cloned().collect()))
                }
            } else {
                lookup(source, &path).cloned()
            };

            match mapped {
                Some(value) => {
                    data.insert(target_key.clone(), value);
                }
                None => {
                    tracing::debug!("⏭️ Field '{}' not present, skipping '{}'", source_path, target_key);
                }
            }
        }

        Ok(Self { data })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Typed read of a mapped key; a missing key is `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| IntegrationError::InvalidTypeError {
                    path: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}
