//! Code Analyzer Module
//!
//! Turns Go source directories into documentation packages:
//! - Go parsing (declaration and comment extraction)
//! - Package directory discovery with gitignore support
//! - Per-directory package assembly

pub mod loader;
pub mod parser;
pub mod scanner;

pub use loader::PackageLoader;
pub use scanner::PackageScanner;
