//! Generate Command
//!
//! Render Markdown for a package directory (or a whole tree) to stdout or a file.
//!
//! Usage:
//!   godocmd generate --dir <DIR> [--out <FILE>] [-r] [-p] [--include-undocumented]

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::{ConfigLoader, GenerateConfig};
use crate::generator::{GenerateReport, generate_markdown};
use crate::types::{GodocError, Result};

/// Command-line inputs; flags can only switch settings on.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub dir: PathBuf,
    pub out: Option<PathBuf>,
    pub recursive: bool,
    pub include_private: bool,
    pub include_undocumented: bool,
    pub quiet: bool,
}

impl GenerateArgs {
    /// Overlay the flags onto the configured settings
    pub fn merge(&self, config: &GenerateConfig) -> GenerateConfig {
        GenerateConfig {
            include_private: config.include_private || self.include_private,
            include_undocumented: config.include_undocumented || self.include_undocumented,
            recursive: config.recursive || self.recursive,
            exclude: config.exclude.clone(),
            output: self.out.clone().or_else(|| config.output.clone()),
        }
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let settings = args.merge(&config.generate);
    let options = settings.generate_options();

    let report = match &settings.output {
        Some(path) => {
            let mut writer = BufWriter::new(open_output(path)?);
            let report = generate_markdown(&args.dir, &mut writer, &options)?;
            writer.flush()?;
            report
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            let report = generate_markdown(&args.dir, &mut writer, &options)?;
            writer.flush()?;
            report
        }
    };

    print_summary(
        &Output::new().quiet(args.quiet),
        &report,
        settings.output.as_deref(),
    );
    Ok(())
}

/// Create the output file, making parent directories as needed
pub fn open_output(path: &Path) -> Result<File> {
    let output_error = |source: io::Error| GodocError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(output_error)?;
    }
    File::create(path).map_err(output_error)
}

fn print_summary(output: &Output, report: &GenerateReport, destination: Option<&Path>) {
    for (dir, reason) in &report.failed {
        output.warning(&format!("Skipped {}: {}", dir.display(), reason));
    }
    for (dir, reason) in &report.errors {
        output.error(&format!("Incomplete {}: {}", dir.display(), reason));
    }
    if !report.skipped.is_empty() {
        output.info(&format!(
            "{} package(s) without declarations",
            report.skipped.len()
        ));
    }

    let target = destination
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    if report.is_clean() {
        output.success(&format!(
            "Documented {} package(s) to {}",
            report.rendered.len(),
            target
        ));
    } else {
        output.error(&format!(
            "Documented {} package(s) to {}; {} could not be written",
            report.rendered.len(),
            target,
            report.errors.len()
        ));
    }
}
