//! clipforge CLI
//!
//! Turns a long video into short, optionally subtitled clips.
//!
//! # Usage
//!
//! ```bash
//! clipforge process --input talk.mp4 --clips 3
//! clipforge process --input talk.mp4 --clips 5 --no-subtitles --bundle --json
//! clipforge bundle --dir output/clips/20240101_120000_1a2b3c4d
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clipforge::adapters::init_tracing;
use clipforge::app::container::DefaultAppContainer;
use clipforge::cli::{commands, Cli, Commands};
use clipforge::config_initialization::initialize_configuration;

/// Main entry point for the clipforge CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = initialize_configuration(&cli)?;
    init_tracing(&config.logging);

    info!("Starting clipforge");
    info!("Output root: {}", config.paths.output_root.display());

    let container = DefaultAppContainer::new(&config)?;

    // Execute the requested command
    let succeeded = match cli.command {
        Commands::Process(args) => {
            info!("Executing process command");
            commands::process(&container, &config, args).await?
        }
        Commands::Bundle(args) => {
            info!("Executing bundle command");
            commands::bundle(&container, args).await?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
