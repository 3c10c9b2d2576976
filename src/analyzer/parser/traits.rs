use crate::types::{FunctionDoc, GodocError, Result, TypeDoc};

/// Declarations extracted from one source file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFile {
    pub path: String,
    /// Name from the file's package clause
    pub package: String,
    pub functions: Vec<FunctionDoc>,
    /// Declared types; `methods` is always empty here
    pub types: Vec<TypeDoc>,
    pub methods: Vec<FunctionDoc>,
}

impl ParsedFile {
    pub fn new(path: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            ..Default::default()
        }
    }
}

pub trait Parser: Send + Sync {
    fn parse(&self, path: &str, content: &str) -> Result<ParsedFile>;
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// One-based line and column of a node's start.
pub fn get_node_position(node: tree_sitter::Node) -> (usize, usize) {
    let start = node.start_position();
    (start.row + 1, start.column + 1)
}

/// Position of the first error or missing node below `node`, if any.
pub fn first_error_position(node: tree_sitter::Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        return Some(get_node_position(node));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error_position)
        // has_error() was true but no child is marked: report the node itself
        .or_else(|| Some(get_node_position(node)))
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| GodocError::parse("", format!("Failed to set {} language: {}", lang_name, e)))?;
    Ok(parser)
}
