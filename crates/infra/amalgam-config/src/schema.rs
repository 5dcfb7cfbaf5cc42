//! JSON Schema generation for AmalgamConfig, used by `amalgam config schema`
//! and referenced from `$schema` for editor completion.

use crate::types::AmalgamConfig;
use schemars::{Schema, generate::SchemaSettings};

pub fn schema() -> Schema {
    SchemaSettings::default()
        .into_generator()
        .into_root_schema_for::<AmalgamConfig>()
}

/// Generate the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> jsonschema::Validator {
        jsonschema::validator_for(&serde_json::to_value(schema()).unwrap()).unwrap()
    }

    #[test]
    fn test_schema_is_valid_json() {
        let json = schema_json_pretty().unwrap();
        let _: serde_json::Value = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn test_schema_describes_include_section() {
        let json = schema_json_pretty().unwrap();
        assert!(json.contains("\"search_paths\""));
        assert!(json.contains("\"max_depth\""));
        assert!(json.contains("\"level\""));
    }

    #[test]
    fn test_default_config_validates_against_schema() {
        let config_json = serde_json::to_value(AmalgamConfig::default()).unwrap();
        let result = validator().validate(&config_json);
        assert!(
            result.is_ok(),
            "Default config should validate against schema: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_partial_config_validates_against_schema() {
        let config_json = serde_json::json!({
            "include": { "search_paths": ["vendor/include", "/usr/local/include"] }
        });
        assert!(validator().validate(&config_json).is_ok());
    }

    #[test]
    fn test_wrong_type_fails_schema() {
        let config_json = serde_json::json!({ "include": { "max_depth": "deep" } });
        assert!(validator().validate(&config_json).is_err());
    }
}
