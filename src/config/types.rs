//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (platform config dir) and project (`.godocmd.toml`) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::generator::GenerateOptions;
use crate::render::RenderOptions;
use crate::types::{GodocError, Result};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Markdown generation settings
    pub generate: GenerateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generate: GenerateConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `GodocError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.generate.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                GodocError::Config(format!("Invalid exclude pattern {}: {}", pattern, e))
            })?;
        }

        if let Some(output) = &self.generate.output
            && output.as_os_str().is_empty()
        {
            return Err(GodocError::Config(
                "generate.output must not be an empty path".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Include unexported functions, types and methods
    pub include_private: bool,

    /// Include symbols without a doc comment
    pub include_undocumented: bool,

    /// Document every package below the target directory
    pub recursive: bool,

    /// Glob patterns for directories skipped by recursive scans
    pub exclude: Vec<String>,

    /// Output file; stdout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl GenerateConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.include_private, self.include_undocumented)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            recursive: self.recursive,
            render: self.render_options(),
            exclude: self.exclude.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert!(!config.generate.include_private);
        assert!(!config.generate.include_undocumented);
        assert!(!config.generate.recursive);
        assert!(config.generate.output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let mut config = Config::default();
        config.generate.exclude = vec!["internal/**".to_string(), "[".to_string()];
        assert!(matches!(config.validate(), Err(GodocError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_output() {
        let mut config = Config::default();
        config.generate.output = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generate_options_mapping() {
        let generate = GenerateConfig {
            include_private: true,
            recursive: true,
            exclude: vec!["mocks".to_string()],
            ..Default::default()
        };
        let options = generate.generate_options();
        assert!(options.recursive);
        assert_eq!(options.render, RenderOptions::new(true, false));
        assert_eq!(options.exclude, vec!["mocks".to_string()]);
    }
}
