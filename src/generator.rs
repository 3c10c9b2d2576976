//! Batch Markdown Generation
//!
//! Resolves the package directories for a run, loads each one and appends its
//! rendered document to a single output stream. A directory that fails to load
//! or render is reported and skipped; the batch always runs to the end.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::analyzer::{PackageLoader, PackageScanner};
use crate::constants::markdown::PACKAGE_SEPARATOR;
use crate::render::{RenderOptions, write_markdown};
use crate::types::{DocumentationPackage, Result};

/// Options for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Document every package below the root instead of the root alone
    pub recursive: bool,
    pub render: RenderOptions,
    /// Glob patterns for directories to leave out of a recursive scan
    pub exclude: Vec<String>,
}

/// Outcome of a generation run, per directory.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub rendered: Vec<PathBuf>,
    /// Packages without any declarations
    pub skipped: Vec<PathBuf>,
    /// Directories that could not be loaded, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Directories whose section could not be written, with the reason
    pub errors: Vec<(PathBuf, String)>,
}

impl GenerateReport {
    /// True when every loaded package made it into the output intact
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Generate Markdown for `root` (and its sub-packages when recursive) into `out`.
///
/// Only directory discovery can fail the whole run.
pub fn generate_markdown<W: Write + ?Sized>(
    root: &Path,
    out: &mut W,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let dirs = if options.recursive {
        let dirs = PackageScanner::new(root)
            .with_exclude(&options.exclude)?
            .scan()?;
        info!("Found {} Go package directories", dirs.len());
        dirs
    } else {
        vec![root.to_path_buf()]
    };

    let loader = PackageLoader::new()?;
    Ok(render_packages(&loader, &dirs, out, options.render))
}

/// Load and render `dirs` in order, separating emitted packages with a rule.
///
/// Each package is streamed straight into `out`; a write failure can leave a
/// partial section behind.
pub fn render_packages<W: Write + ?Sized>(
    loader: &PackageLoader,
    dirs: &[PathBuf],
    out: &mut W,
    options: RenderOptions,
) -> GenerateReport {
    let mut report = GenerateReport::default();

    for dir in dirs {
        debug!("Parsing package: {}", dir.display());

        let package = match loader.load(dir) {
            Ok(package) => package,
            Err(e) if e.is_load_error() => {
                warn!("Skipping {}: {}", dir.display(), e);
                report.failed.push((dir.clone(), e.to_string()));
                continue;
            }
            Err(e) => {
                error!("Unexpected error loading {}: {}", dir.display(), e);
                report.errors.push((dir.clone(), e.to_string()));
                continue;
            }
        };

        if package.is_empty() {
            debug!("Skipping {}: no declarations", dir.display());
            report.skipped.push(dir.clone());
            continue;
        }

        let separated = !report.rendered.is_empty();
        match write_package(out, dir, &package, separated, options) {
            Ok(()) => report.rendered.push(dir.clone()),
            Err(e) => {
                error!("Failed to write markdown for {}: {}", dir.display(), e);
                report.errors.push((dir.clone(), e.to_string()));
            }
        }
    }

    report
}

fn write_package<W: Write + ?Sized>(
    out: &mut W,
    dir: &Path,
    package: &DocumentationPackage,
    separated: bool,
    options: RenderOptions,
) -> Result<()> {
    if separated {
        out.write_all(PACKAGE_SEPARATOR.as_bytes())?;
    }
    write!(out, "<!-- {} -->\n\n", dir.display())?;
    write_markdown(package, out, options)
}
