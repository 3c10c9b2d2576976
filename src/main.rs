use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use godocmd::cli::commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(name = "godocmd")]
#[command(version, about = "Generate Markdown API documentation from Go packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable verbose log output")]
    verbose: bool,

    #[arg(long, short, global = true, help = "Only report errors")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown for a Go package directory
    Generate {
        #[arg(long, short, help = "Directory to scan for Go packages")]
        dir: PathBuf,
        #[arg(long, short, help = "Output markdown file (default is stdout)")]
        out: Option<PathBuf>,
        #[arg(
            long,
            short,
            help = "Recursively find and document all Go packages under the given directory"
        )]
        recursive: bool,
        #[arg(
            long,
            short = 'p',
            help = "Include unexported functions, types and methods"
        )]
        include_private: bool,
        #[arg(long, help = "Include functions and types that lack doc comments")]
        include_undocumented: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            value_parser = ["toml", "json"],
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a default .godocmd.toml in the current directory
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mgodocmd encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/thinktide/godocmd/issues");
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // stdout may carry the generated document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            dir,
            out,
            recursive,
            include_private,
            include_undocumented,
        } => {
            godocmd::cli::commands::generate::run(GenerateArgs {
                dir,
                out,
                recursive,
                include_private,
                include_undocumented,
                quiet: cli.quiet,
            })?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                godocmd::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                godocmd::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                godocmd::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
