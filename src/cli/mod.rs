//! CLI module for clipforge
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// clipforge
///
/// Cuts the most interesting short clips out of a long video, optionally
/// with burned-in subtitles.
#[derive(Parser, Debug)]
#[command(name = "clipforge")]
#[command(about = "clipforge - Turn long videos into subtitled short clips")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: clipforge.toml or config/clipforge.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate clips from a video
    Process(args::ProcessArgs),
    /// Zip a finished output directory
    Bundle(args::BundleArgs),
}
