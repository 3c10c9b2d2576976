//! Visibility and documentation filtering

use serde::{Deserialize, Serialize};

/// Symbol filtering options for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Include symbols whose name is not exported
    pub include_private: bool,
    /// Include symbols without a doc comment
    pub include_undocumented: bool,
}

impl RenderOptions {
    pub fn new(include_private: bool, include_undocumented: bool) -> Self {
        Self {
            include_private,
            include_undocumented,
        }
    }

    /// Options that let every symbol through
    pub fn all() -> Self {
        Self::new(true, true)
    }

    pub fn includes(&self, name: &str, doc: &str) -> bool {
        should_include(name, doc, self.include_private, self.include_undocumented)
    }
}

/// Go visibility: an uppercase first letter means exported
#[inline]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Decide whether a symbol appears in the output.
///
/// The visibility and documentation checks are independent; failing either
/// one excludes the symbol.
pub fn should_include(
    name: &str,
    doc: &str,
    include_private: bool,
    include_undocumented: bool,
) -> bool {
    if !include_private && !is_exported(name) {
        return false;
    }
    if !include_undocumented && doc.trim().is_empty() {
        return false;
    }
    true
}
