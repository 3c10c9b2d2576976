//! Source Parser Module
//!
//! Tree-sitter based extraction of documented declarations from Go files.
//!
//! ```rust,ignore
//! use godocmd::analyzer::parser::{GoParser, Parser};
//!
//! let parser = GoParser::new()?;
//! let file = parser.parse("user.go", content)?;
//! ```

pub mod go;
pub mod traits;

pub use go::GoParser;
pub use traits::{
    ParsedFile, Parser, create_ts_parser, first_error_position, get_node_position, get_node_text,
};
