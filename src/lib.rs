//! godocmd - Markdown API Reference for Go Packages
//!
//! Reads Go source directories and renders their exported functions, types
//! and methods, with doc comments and struct field metadata, as Markdown.
//!
//! ## Core Features
//!
//! - **Tree-sitter Parsing**: declarations, receivers and doc comments from Go source
//! - **Filtering**: exported-only and documented-only by default
//! - **Struct Metadata**: aligned field listings plus JSON and DynamoDB tag blocks
//! - **Batch Mode**: every package under a tree into one document
//!
//! ## Quick Start
//!
//! ```ignore
//! use godocmd::{GenerateOptions, generate_markdown};
//!
//! let mut out = std::io::stdout();
//! let report = generate_markdown(Path::new("./pkg"), &mut out, &GenerateOptions::default())?;
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: Go parsing with tree-sitter, package discovery and loading
//! - [`render`]: filtering, signatures, struct blocks and document assembly
//! - [`generator`]: batch generation across package directories
//! - [`config`]: layered configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod generator;
pub mod render;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, GenerateConfig};

// Error Types
pub use types::error::{GodocError, Result};

// Model
pub use types::{
    DocumentationPackage, FieldDoc, FunctionDoc, ParamGroup, Receiver, ReceiverKind, StorageType,
    StructTag, TypeDecl, TypeDoc, TypeExpr,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use analyzer::{PackageLoader, PackageScanner};
pub use generator::{GenerateOptions, GenerateReport, generate_markdown};
pub use render::{RenderOptions, render_signature, write_markdown};
