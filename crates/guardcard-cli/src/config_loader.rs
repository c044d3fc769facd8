//! Configuration loading utilities for CLI commands

use crate::cli::Cli;
use anyhow::{Context, Result};
use guardcard_core::catalog::Catalog;
use guardcard_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when --config is absent
pub const DEFAULT_CONFIG_FILE: &str = "guardcard.toml";

/// Resolve which config file to read, if any
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}

/// Load layered configuration: defaults, file, environment, then CLI overrides
pub fn load_config(cli: &Cli, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(cli.config.as_deref()) {
        tracing::debug!("Reading configuration from {}", path.display());
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        ..overrides
    });
    Ok(config)
}

/// Load the facility and quiz catalog named by the configuration
pub fn load_catalog(config: &LayeredConfig) -> Result<Catalog> {
    let catalog = match &config.data_dir.value {
        Some(dir) => Catalog::load_dir(dir)
            .with_context(|| format!("Failed to load data from {}", dir.display()))?,
        None => Catalog::bundled().context("Bundled data is corrupt")?,
    };
    Ok(catalog)
}
