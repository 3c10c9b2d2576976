//! Subcommand implementations invoked from the binary.

pub mod config;
pub mod generate;
