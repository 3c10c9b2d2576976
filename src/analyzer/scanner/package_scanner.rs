use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::constants::scanner::{
    GO_EXTENSION, SKIPPED_DIR_PREFIX, SKIPPED_ROOT_DIRS, TEST_FILE_SUFFIX,
};
use crate::types::{GodocError, Result};

/// Finds every directory below a root that holds a Go package.
pub struct PackageScanner {
    root: PathBuf,
    exclude: Vec<glob::Pattern>,
}

impl PackageScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: Vec::new(),
        }
    }

    /// Additional glob patterns matched against root-relative directory paths
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude = patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p)
                    .map_err(|e| GodocError::Config(format!("Invalid exclude pattern {}: {}", p, e)))
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Directories containing at least one non-test `.go` file, in walk order.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(GodocError::Scan(format!(
                "Not a directory: {}",
                self.root.display()
            )));
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut seen = HashSet::new();
        let mut dirs = Vec::new();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_package_source(path) {
                continue;
            }

            let Some(dir) = path.parent() else {
                continue;
            };
            if seen.contains(dir) {
                continue;
            }
            seen.insert(dir.to_path_buf());

            if self.should_exclude(dir) {
                debug!("Excluding directory {}", dir.display());
                continue;
            }
            dirs.push(dir.to_path_buf());
        }

        debug!(
            "Found {} package directories under {}",
            dirs.len(),
            self.root.display()
        );
        Ok(dirs)
    }

    fn should_exclude(&self, dir: &Path) -> bool {
        let Ok(relative) = dir.strip_prefix(&self.root) else {
            return false;
        };
        // The root itself is always scanned
        if relative.as_os_str().is_empty() {
            return false;
        }

        let components: Vec<&str> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();

        if components
            .first()
            .is_some_and(|first| SKIPPED_ROOT_DIRS.contains(first))
        {
            return true;
        }
        if components.iter().any(|c| c.starts_with('.')) {
            return true;
        }
        if components
            .first()
            .is_some_and(|first| first.starts_with(SKIPPED_DIR_PREFIX))
        {
            return true;
        }

        // an excluded directory takes its subdirectories with it
        (1..=components.len()).any(|depth| {
            let prefix = components[..depth].join("/");
            self.exclude.iter().any(|p| p.matches(&prefix))
        })
    }
}

fn is_package_source(path: &Path) -> bool {
    let is_go = path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION);
    let is_test = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX));
    is_go && !is_test
}
