//! Configuration initialization and hierarchy management

use tracing::info;

use crate::adapters::toml_config::AppConfig;
use crate::adapters::tracing_log::is_valid_level;
use crate::cli::{Cli, Commands};
use crate::error::{ClipforgeError, ClipforgeResult};

/// Build the effective configuration: defaults < file < environment < CLI
pub fn initialize_configuration(cli: &Cli) -> ClipforgeResult<AppConfig> {
    // Steps 1 and 2: defaults, then the config file if any
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // Step 3: environment variables
    let overrides = config.apply_env(|key| std::env::var(key).ok())?;
    if overrides > 0 {
        info!("Applied {} environment variable overrides", overrides);
    }

    // Step 4: CLI arguments
    apply_cli_overrides(&mut config, cli)?;

    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> ClipforgeResult<()> {
    if let Some(level) = &cli.log_level {
        if !is_valid_level(level) {
            return Err(ClipforgeError::Config {
                message: format!("Invalid log level: {}", level),
            });
        }
        config.logging.level = level.clone();
    }

    if let Commands::Process(args) = &cli.command {
        if let Some(root) = &args.output_root {
            config.paths.output_root = root.clone();
        }
    }

    Ok(())
}
