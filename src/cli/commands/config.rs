//! Config Command
//!
//! Manage godocmd configuration.
//!
//! Usage:
//!   godocmd config show [-f json]
//!   godocmd config path
//!   godocmd config init [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged configuration
pub fn show(format: &str) -> Result<()> {
    ConfigLoader::show_config(format == "json")
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write `.godocmd.toml` into the current directory
pub fn init(force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(Path::new("."), force)?;
    Output::new().success(&format!("Created {}", path.display()));
    Ok(())
}
