//! Global Constants
//!
//! Centralized constants for output formatting and package discovery.

/// Markdown output constants
pub mod markdown {
    /// Fence label for declarations and struct blocks
    pub const SOURCE_FENCE: &str = "go";

    /// Fence label for the serialization tag block
    pub const JSON_FENCE: &str = "json";

    /// Fence label for the storage tag block
    pub const STORAGE_FENCE: &str = "sql";

    /// Column width the storage tag is padded to
    pub const STORAGE_COLUMN_WIDTH: usize = 25;

    /// Indentation of struct field rows
    pub const FIELD_INDENT: &str = "    ";

    /// Separator written between consecutive package blocks
    pub const PACKAGE_SEPARATOR: &str = "\n\n---\n";
}

/// Package discovery constants
pub mod scanner {
    /// Go source file extension
    pub const GO_EXTENSION: &str = "go";

    /// Suffix of test files, which are never loaded
    pub const TEST_FILE_SUFFIX: &str = "_test.go";

    /// Top-level directories that never hold documented packages
    pub const SKIPPED_ROOT_DIRS: &[&str] = &["vendor", "docs"];

    /// Infrastructure directories are skipped by prefix
    pub const SKIPPED_DIR_PREFIX: &str = "terraform";
}

/// Configuration constants
pub mod config {
    /// Application name used for config directories
    pub const APP_NAME: &str = "godocmd";

    /// Project config file, relative to the working directory
    pub const PROJECT_CONFIG_FILE: &str = ".godocmd.toml";

    /// Global config file name inside the platform config directory
    pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "GODOCMD_";

    /// Separator between nested keys in environment variables
    pub const ENV_SEPARATOR: &str = "__";
}
