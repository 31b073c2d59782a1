//! Configuration for deploying a name service instance
//!
//! Values come from defaults, then an optional TOML file, then `HNS_*`
//! environment variables.

use crate::errors::*;
use hns_types::Principal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Deployment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameServiceConfig {
    /// Principal that initializes the registry and owns the root node
    pub deployer: Principal,
    /// Top-level label handed to the FIFS registrar
    pub tld: String,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
}

impl Default for NameServiceConfig {
    fn default() -> Self {
        Self {
            deployer: Principal::from_seed(b"deployer"),
            tld: "eth".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl NameServiceConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Io(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("HNS_DEPLOYER") {
            self.deployer = val
                .parse()
                .map_err(|e| ServiceError::Config(format!("HNS_DEPLOYER: {e}")))?;
        }
        if let Some(val) = lookup("HNS_TLD") {
            self.tld = val;
        }
        if let Some(val) = lookup("HNS_LOG_LEVEL") {
            self.log_level = val;
        }
        if let Some(val) = lookup("HNS_LOG_FORMAT") {
            self.log_format = val;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.deployer.is_zero() {
            return Err(ServiceError::Config(
                "deployer must not be the zero principal".to_string(),
            ));
        }
        if self.tld.is_empty() || self.tld.contains('.') {
            return Err(ServiceError::Config(format!(
                "tld must be a single non-empty label, got {:?}",
                self.tld
            )));
        }
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err(ServiceError::Config(format!(
                "unknown log format {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = NameServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tld, "eth");
    }

    #[test]
    fn test_load_from_file_keeps_missing_defaults() {
        let deployer = Principal::from_seed(b"file-deployer");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "deployer = \"{deployer}\"").unwrap();
        writeln!(file, "tld = \"example\"").unwrap();

        let config = NameServiceConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.deployer, deployer);
        assert_eq!(config.tld, "example");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = NameServiceConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
    }

    #[test]
    fn test_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "deployer = \"not-a-principal\"").unwrap();
        let err = NameServiceConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_overrides_apply() {
        let deployer = Principal::from_seed(b"env-deployer");
        let env: HashMap<&str, String> = HashMap::from([
            ("HNS_DEPLOYER", deployer.to_string()),
            ("HNS_TLD", "test".to_string()),
            ("HNS_LOG_FORMAT", "json".to_string()),
        ]);

        let mut config = NameServiceConfig::default();
        config
            .apply_overrides(|key| env.get(key).cloned())
            .unwrap();
        assert_eq!(config.deployer, deployer);
        assert_eq!(config.tld, "test");
        assert_eq!(config.log_format, "json");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = NameServiceConfig::default();
        let err = config
            .apply_overrides(|key| (key == "HNS_DEPLOYER").then(|| "0x12".to_string()))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = NameServiceConfig {
            tld: "test.eth".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        config.tld = String::new();
        assert!(config.validate().is_err());
        config.tld = "eth".to_string();
        config.deployer = Principal::ZERO;
        assert!(config.validate().is_err());
        config.deployer = Principal::from_seed(b"d");
        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
