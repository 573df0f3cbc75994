use std::fs;

use fractic_server_error::ServerError;
use serde_derive::Deserialize;

use crate::{
    entities::RateAssumptions,
    errors::{InvalidConfig, ReadError},
};

/// What to do when a subcategory list (ex. `revenue.operating`) is absent from
/// an otherwise valid statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum MissingSubcategoryPolicy {
    #[default]
    Reject,
    TreatAsEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL serving both `/api/process-pdf` and `/api/chat`.
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_upload_bytes: u64,
}

/// Crate configuration. Every field has a default, so a RON file only needs to
/// list what it overrides, ex.:
///
/// ```ron
/// (
///     assumptions: (tax_rate: 0.25),
///     missing_subcategories: TreatAsEmpty,
///     service: (base_url: "https://flows.example.com"),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct FlowsConfig {
    pub assumptions: RateAssumptions,
    pub missing_subcategories: MissingSubcategoryPolicy,
    pub service: ServiceConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl FlowsConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        ron::from_str(s).map_err(|e| InvalidConfig::with_debug(&e))
    }

    pub fn from_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        Self::from_ron_str(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = FlowsConfig::from_ron_str("()").unwrap();
        assert_eq!(config, FlowsConfig::default());
        assert_eq!(config.assumptions.cost_of_equity, 0.10);
        assert_eq!(config.assumptions.cost_of_debt, 0.05);
        assert_eq!(config.assumptions.tax_rate, 0.30);
        assert_eq!(config.missing_subcategories, MissingSubcategoryPolicy::Reject);
        assert_eq!(config.service.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn partial_overrides() {
        let config = FlowsConfig::from_ron_str(
            r#"(
                assumptions: (tax_rate: 0.25),
                missing_subcategories: TreatAsEmpty,
                service: (base_url: "https://flows.example.com", timeout_secs: 5),
            )"#,
        )
        .unwrap();
        assert_eq!(config.assumptions.tax_rate, 0.25);
        assert_eq!(config.assumptions.cost_of_debt, 0.05);
        assert_eq!(
            config.missing_subcategories,
            MissingSubcategoryPolicy::TreatAsEmpty
        );
        assert_eq!(config.service.base_url, "https://flows.example.com");
        assert_eq!(config.service.timeout_secs, 5);
        assert_eq!(config.service.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(FlowsConfig::from_ron_str("(assumptions: 3)").is_err());
        assert!(FlowsConfig::from_ron_str("(missing_subcategories: Sometimes)").is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flows.ron");
        fs::write(&path, "(service: (timeout_secs: 10))").unwrap();
        assert_eq!(FlowsConfig::from_file(&path).unwrap().service.timeout_secs, 10);
        assert!(FlowsConfig::from_file(dir.path().join("missing.ron")).is_err());
    }
}
