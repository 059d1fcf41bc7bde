//! Runtime configuration.
//!
//! Loaded from `socnet.toml`. Every field has a default, so an empty file (or
//! no file at all) yields [`SocnetConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SocnetError, SocnetResult};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "socnet.toml";

/// Tunables for the social layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocnetConfig {
    /// Largest depth accepted by traversals and shortest-path searches.
    pub max_traversal_depth: usize,
    /// Path length bound the recommender passes to the path counter.
    pub recommendation_path_length: usize,
    /// Maximum person name length in bytes.
    pub max_name_len: usize,
    /// Maximum status text length in bytes.
    pub max_status_len: usize,
}

impl Default for SocnetConfig {
    fn default() -> Self {
        Self {
            max_traversal_depth: 6,
            recommendation_path_length: 2,
            max_name_len: 256,
            max_status_len: 4096,
        }
    }
}

impl SocnetConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> SocnetResult<Self> {
        let cfg: SocnetConfig = toml::from_str(text)
            .map_err(|e| SocnetError::invalid_input(format!("config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the file cannot be read or does not hold a valid
    /// configuration.
    pub fn load(path: impl AsRef<Path>) -> SocnetResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            SocnetError::invalid_input(format!("config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> SocnetResult<String> {
        toml::to_string(self).map_err(|e| SocnetError::invalid_input(format!("config: {}", e)))
    }

    /// Reject settings that would make queries meaningless.
    pub fn validate(&self) -> SocnetResult<()> {
        if self.max_traversal_depth == 0 {
            return Err(SocnetError::invalid_input(
                "max_traversal_depth must be at least 1",
            ));
        }
        if self.recommendation_path_length == 0 {
            return Err(SocnetError::invalid_input(
                "recommendation_path_length must be at least 1",
            ));
        }
        if self.max_name_len == 0 {
            return Err(SocnetError::invalid_input("max_name_len must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = SocnetConfig::default();
        assert_eq!(cfg.recommendation_path_length, 2);
        assert_eq!(cfg.max_traversal_depth, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = SocnetConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SocnetConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = SocnetConfig::from_toml_str("max_traversal_depth = 3\n").unwrap();
        assert_eq!(cfg.max_traversal_depth, 3);
        assert_eq!(cfg.recommendation_path_length, 2);
        assert_eq!(cfg.max_status_len, 4096);
    }

    #[test]
    fn zero_path_length_rejected() {
        let err = SocnetConfig::from_toml_str("recommendation_path_length = 0\n").unwrap_err();
        assert!(matches!(err, SocnetError::InvalidInput { .. }));
    }

    #[test]
    fn malformed_document_rejected() {
        assert!(SocnetConfig::from_toml_str("max_traversal_depth = \"deep\"").is_err());
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SocnetConfig::load(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(cfg, SocnetConfig::default());
    }

    #[test]
    fn unreadable_config_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let err = SocnetConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, SocnetError::InvalidInput { .. }));
        assert!(!matches!(err, SocnetError::StoreFailure { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "max_name_len = 32").unwrap();
        writeln!(file, "max_status_len = 140").unwrap();
        drop(file);

        let cfg = SocnetConfig::load(&path).unwrap();
        assert_eq!(cfg.max_name_len, 32);
        assert_eq!(cfg.max_status_len, 140);
    }

    #[test]
    fn toml_roundtrip_preserves_settings() {
        let cfg = SocnetConfig {
            max_traversal_depth: 4,
            recommendation_path_length: 3,
            max_name_len: 64,
            max_status_len: 280,
        };
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(SocnetConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
