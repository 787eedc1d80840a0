use crate::entity::Record;
use crate::utils::error::{IntegrationError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub entity: EntityConfig,
    pub field_mapping: HashMap<String, String>,
    pub required_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    pub name: String,
    pub description: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl MappingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "📁 Loaded mapping '{}' from {} ({} fields)",
            config.entity.name,
            path.as_ref().display(),
            config.field_mapping.len()
        );
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IntegrationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TENDER_PREFIX})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn required_fields(&self) -> &[String] {
        self.required_fields.as_deref().unwrap_or(&[])
    }

    /// 將來源文件映射成記錄，並檢查必要欄位
    pub fn apply(&self, source: &Value) -> Result<Record> {
        let record = Record::from_mapping(source, &self.field_mapping)?;

        if let Some(missing) = self.required_fields().iter().find(|key| !record.contains(key)) {
            tracing::debug!("❌ {}: required field '{}' missing", self.entity.name, missing);
            return Err(IntegrationError::MissingFieldError {
                path: missing.clone(),
            });
        }

        Ok(record)
    }
}

impl Validate for MappingConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("entity.name", &self.entity.name)?;
        validation::validate_field_mapping("field_mapping", &self.field_mapping)?;
        validation::validate_required_targets(
            "required_fields",
            self.required_fields(),
            &self.field_mapping,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TENDER_MAPPING: &str = r#"
required_fields = ["tender_id"]

[entity]
name = "tender"
description = "Tender summary"

[field_mapping]
"tender.id" = "tender_id"
"tender.value.amount" = "amount"
"tender.items[*].id" = "item_ids"
"#;

    #[test]
    fn test_parse_mapping_config() {
        let config = MappingConfig::from_toml_str(TENDER_MAPPING).unwrap();

        assert_eq!(config.entity.name, "tender");
        assert_eq!(config.field_mapping.len(), 3);
        assert_eq!(config.required_fields(), &["tender_id".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RELEASES_TEST_ENTITY_NAME", "award");

        let toml_content = r#"
[entity]
name = "${RELEASES_TEST_ENTITY_NAME}"

[field_mapping]
"id" = "id"
"#;

        let config = MappingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.entity.name, "award");

        std::env::remove_var("RELEASES_TEST_ENTITY_NAME");
    }

    #[test]
    fn test_unset_env_var_kept_verbatim() {
        let toml_content = r#"
[entity]
name = "${RELEASES_TEST_SURELY_UNSET}"

[field_mapping]
"id" = "id"
"#;

        let config = MappingConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.entity.name, "${RELEASES_TEST_SURELY_UNSET}");
    }

    #[test]
    fn test_invalid_toml() {
        let err = MappingConfig::from_toml_str("[entity\nname = ").unwrap_err();
        assert!(matches!(err, IntegrationError::ConfigError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
required_fields = ["buyer"]

[entity]
name = "tender"

[field_mapping]
"tender.id" = "tender_id"
"#;
        let config = MappingConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[entity]
name = "tender"

[field_mapping]
"tender.items[" = "items"
"#;
        let config = MappingConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[entity]
name = "tender"

[field_mapping]
"tender.id" = "id"
"ocid" = "id"
"#;
        let config = MappingConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(IntegrationError::InvalidConfigValueError { ref value, .. }) if value == "id"
        ));
    }

    #[test]
    fn test_apply_enforces_required_fields() {
        let config = MappingConfig::from_toml_str(TENDER_MAPPING).unwrap();

        let record = config
            .apply(&json!({
                "tender": {
                    "id": "t-9",
                    "items": [{ "id": "a" }, { "id": "b" }]
                }
            }))
            .unwrap();
        assert_eq!(record.data["tender_id"], json!("t-9"));
        assert_eq!(record.data["item_ids"], json!(["a", "b"]));
        assert!(!record.contains("amount"));

        let err = config.apply(&json!({ "tender": { "status": "active" } })).unwrap_err();
        assert!(matches!(err, IntegrationError::MissingFieldError { ref path } if path == "tender_id"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(TENDER_MAPPING.as_bytes()).unwrap();

        let config = MappingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.entity.name, "tender");
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = MappingConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, IntegrationError::IoError(_)));
    }
}
