use anyhow::{anyhow, Context, Result};

use crate::form::defaults::{default_mapping, FORM_BASE_URL};
use crate::form::FieldMapping;
use crate::profile::extractor::DEFAULT_MAX_INPUT_BYTES;
use crate::profile::ProfileSchema;

const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the target form (no query string).
    pub form_base_url: String,
    /// Field → prefill parameter table used when a request brings none.
    pub form_mapping: FieldMapping,
    pub profile_schema: ProfileSchema,
    pub max_input_bytes: usize,
    pub upload_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let form_mapping = match var("FORM_FIELD_MAPPING") {
            Some(raw) => FieldMapping::from_json_str(&raw)
                .map_err(|e| anyhow!("FORM_FIELD_MAPPING is not a valid mapping: {e}"))?,
            None => default_mapping(),
        };

        let profile_schema = match var("PROFILE_SCHEMA") {
            Some(raw) => raw
                .parse::<ProfileSchema>()
                .map_err(|e| anyhow!("PROFILE_SCHEMA: {e}"))?,
            None => ProfileSchema::default(),
        };

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            form_base_url: var("FORM_BASE_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| FORM_BASE_URL.to_string()),
            form_mapping,
            profile_schema,
            max_input_bytes: parse_usize(var("MAX_INPUT_BYTES"), DEFAULT_MAX_INPUT_BYTES)
                .context("MAX_INPUT_BYTES must be a positive integer")?,
            upload_limit_bytes: parse_usize(var("UPLOAD_LIMIT_BYTES"), DEFAULT_UPLOAD_LIMIT_BYTES)
                .context("UPLOAD_LIMIT_BYTES must be a positive integer")?,
        })
    }
}

impl Config {
    /// Whether the mapping references at least one field the profile schema emits.
    /// When it does not, prefilling from an extracted profile yields the bare base URL.
    pub fn mapping_covers_schema(&self) -> bool {
        self.profile_schema
            .field_names()
            .iter()
            .any(|field| self.form_mapping.get(field).is_some())
    }
}

fn parse_usize(raw: Option<String>, default: usize) -> Result<usize> {
    match raw {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<usize>()? {
            0 => Err(anyhow!("value must be greater than zero")),
            n => Ok(n),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.form_base_url, FORM_BASE_URL);
        assert_eq!(config.form_mapping, default_mapping());
        assert_eq!(config.profile_schema, ProfileSchema::Referral);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(config.upload_limit_bytes, DEFAULT_UPLOAD_LIMIT_BYTES);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("FORM_BASE_URL", " https://example.com/form "),
            ("FORM_FIELD_MAPPING", r#"{"full_name": "entry.1"}"#),
            ("PROFILE_SCHEMA", "detailed"),
            ("MAX_INPUT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.form_base_url, "https://example.com/form");
        assert_eq!(config.form_mapping.get("full_name"), Some("entry.1"));
        assert_eq!(config.form_mapping.len(), 1);
        assert_eq!(config.profile_schema, ProfileSchema::Detailed);
        assert_eq!(config.max_input_bytes, 1024);
    }

    #[test]
    fn test_mapping_must_be_object() {
        let err = config_from(&[("FORM_FIELD_MAPPING", r#"["entry.1"]"#)]).unwrap_err();
        assert!(err.to_string().contains("FORM_FIELD_MAPPING"));
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("PROFILE_SCHEMA", "compact")]).is_err());
        assert!(config_from(&[("MAX_INPUT_BYTES", "0")]).is_err());
    }

    #[test]
    fn test_default_mapping_does_not_cover_detailed_schema() {
        assert!(config_from(&[]).unwrap().mapping_covers_schema());
        let detailed = config_from(&[("PROFILE_SCHEMA", "detailed")]).unwrap();
        assert!(!detailed.mapping_covers_schema());
        let paired = config_from(&[
            ("PROFILE_SCHEMA", "detailed"),
            ("FORM_FIELD_MAPPING", r#"{"full_name": "entry.1"}"#),
        ])
        .unwrap();
        assert!(paired.mapping_covers_schema());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("FORM_FIELD_MAPPING", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.form_mapping, default_mapping());
    }
}
