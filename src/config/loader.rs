//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (`<platform config dir>/godocmd/config.toml`)
//! 3. Project config (`.godocmd.toml`)
//! 4. Environment variables (`GODOCMD_*` prefix, `__` between sections)

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::config::{
    APP_NAME, ENV_PREFIX, ENV_SEPARATOR, GLOBAL_CONFIG_FILE, PROJECT_CONFIG_FILE,
};
use crate::types::{GodocError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Resolve the chain with explicit file locations
    pub fn load_layers(global: Option<&Path>, project: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        // Merge project config
        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // e.g. GODOCMD_GENERATE__INCLUDE_PRIVATE -> generate.include_private
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .split(ENV_SEPARATOR)
                .lowercase(true),
        );

        let config: Config = figment
            .extract()
            .map_err(|e| GodocError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Platform config directory, e.g. `~/.config/godocmd/` on Linux
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;
        println!("{}", Self::render_config(&config, as_json)?);
        Ok(())
    }

    /// Serialize a configuration as pretty JSON or TOML
    pub fn render_config(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| GodocError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a commented default project config into `dir`
    pub fn init_project(dir: &Path, force: bool) -> Result<PathBuf> {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() && !force {
            return Err(GodocError::Config(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            )));
        }

        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());
        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# godocmd Project Configuration
# Settings here override the global config; GODOCMD_* environment variables
# and command-line flags override both.

version = "1.0"

[generate]
# Include unexported functions, types and methods
include_private = false

# Include symbols that have no doc comment
include_undocumented = false

# Document every package below --dir
recursive = false

# Directories to skip during recursive scans, with everything below them
# (glob, relative to --dir)
exclude = []

# Write to a file instead of stdout
# output = "docs/API.md"
"#
        .to_string()
    }
}
