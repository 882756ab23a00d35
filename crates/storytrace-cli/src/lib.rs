//! Storytrace CLI library.
//!
//! This library provides the core functionality for the `storytrace` command-line
//! interface, including configuration management, article ingestion, command
//! execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{AppConfig, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
