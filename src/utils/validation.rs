use crate::entity::FieldPath;
use crate::utils::error::{IntegrationError, Result};
use std::collections::{HashMap, HashSet};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntegrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_field_path(field_name: &str, path: &str) -> Result<FieldPath> {
    path.parse::<FieldPath>()
        .map_err(|e| IntegrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: e.to_string(),
        })
}

pub fn validate_field_mapping(field_name: &str, mapping: &HashMap<String, String>) -> Result<()> {
    if mapping.is_empty() {
        return Err(IntegrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "{}".to_string(),
            reason: "Mapping must contain at least one field".to_string(),
        });
    }

    let mut targets = HashSet::new();
    for (source, target) in mapping {
        validate_field_path(field_name, source)?;
        validate_non_empty_string(&format!("{}.{}", field_name, source), target)?;

        if !targets.insert(target.as_str()) {
            return Err(IntegrationError::InvalidConfigValueError {
                field: format!("{}.{}", field_name, source),
                value: target.clone(),
                reason: "Target key is mapped from more than one source path".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_required_targets(
    field_name: &str,
    required: &[String],
    mapping: &HashMap<String, String>,
) -> Result<()> {
    for key in required {
        if !mapping.values().any(|target| target == key) {
            return Err(IntegrationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: key.clone(),
                reason: "Required field is not produced by the field mapping".to_string(),
            });
        }
    }
    Ok(())
}
