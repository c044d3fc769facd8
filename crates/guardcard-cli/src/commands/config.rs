//! Config command implementation

use crate::cli::Cli;
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use guardcard_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};

pub fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let config = load_config(cli, CliConfigOverrides::default())?;

    if output.is_json() {
        return output.result(config_output(&config));
    }

    output.section("Configuration");
    let map = config.to_inspection_map();
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        let (value, source) = &map[key];
        output.kv(key, format!("{} ({})", value, source_label(*source)));
    }

    Ok(())
}

fn config_output(config: &LayeredConfig) -> ConfigOutput {
    ConfigOutput {
        search_radius_miles: ConfigEntry {
            value: config.search_radius_miles.value,
            source: source_label(config.search_radius_miles.source).to_string(),
        },
        default_region: ConfigEntry {
            value: config.default_region.value.to_string(),
            source: source_label(config.default_region.source).to_string(),
        },
        location_timeout_secs: ConfigEntry {
            value: config.location_timeout_secs.value,
            source: source_label(config.location_timeout_secs.source).to_string(),
        },
        data_dir: ConfigEntry {
            value: config.data_dir.value.as_ref().map(|d| d.display().to_string()),
            source: source_label(config.data_dir.source).to_string(),
        },
    }
}

fn source_label(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "config file",
        ConfigSource::Environment => "environment",
        ConfigSource::Cli => "command line",
    }
}
