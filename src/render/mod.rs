//! Markdown rendering of documentation packages

pub mod fields;
pub mod filter;
pub mod markdown;
pub mod signature;

pub use filter::{RenderOptions, is_exported, should_include};
pub use markdown::{format_doc_comment, write_markdown};
pub use signature::render_signature;
