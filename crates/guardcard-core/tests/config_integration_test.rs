//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use guardcard_core::config::{
    CliConfigOverrides, ConfigSource, LayeredConfig, ENV_DATA_DIR, ENV_DEFAULT_REGION,
    ENV_LOCATION_TIMEOUT, ENV_RADIUS_MILES,
};
use guardcard_core::models::Coordinate;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var(ENV_RADIUS_MILES);
    env::remove_var(ENV_DEFAULT_REGION);
    env::remove_var(ENV_LOCATION_TIMEOUT);
    env::remove_var(ENV_DATA_DIR);
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file("search_radius_miles = 15.0\n# Only override the radius");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.search_radius_miles.value, 15.0);
    assert_eq!(config.search_radius_miles.source, ConfigSource::File);
    // These should still be defaults
    assert_eq!(config.default_region.value, Coordinate::los_angeles());
    assert_eq!(config.default_region.source, ConfigSource::Default);
    assert_eq!(config.location_timeout_secs.source, ConfigSource::Default);
}

#[test]
fn test_file_rejects_non_positive_radius() {
    let file = config_file("search_radius_miles = 0.0");
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/guardcard.toml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var(ENV_RADIUS_MILES, "75");
    env::set_var(ENV_DEFAULT_REGION, "38.5816,-121.4944");
    env::set_var(ENV_DATA_DIR, "/tmp/guardcard-env-data");

    let file = config_file(
        r#"
search_radius_miles = 20.0
location_timeout_secs = 4
data_dir = "/tmp/guardcard-file-data"
"#,
    );

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    // Environment should override file
    assert_eq!(config.search_radius_miles.value, 75.0);
    assert_eq!(config.search_radius_miles.source, ConfigSource::Environment);
    assert_eq!(config.default_region.value, Coordinate::new(38.5816, -121.4944));
    assert_eq!(config.data_dir.value, Some(PathBuf::from("/tmp/guardcard-env-data")));
    // Not set in the environment, so the file value stands
    assert_eq!(config.location_timeout_secs.value, 4);
    assert_eq!(config.location_timeout_secs.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var(ENV_RADIUS_MILES, "-10");
    env::set_var(ENV_DEFAULT_REGION, "somewhere");
    env::set_var(ENV_LOCATION_TIMEOUT, "soon");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.search_radius_miles.value, 50.0);
    assert_eq!(config.search_radius_miles.source, ConfigSource::Default);
    assert_eq!(config.default_region.source, ConfigSource::Default);
    assert_eq!(config.location_timeout_secs.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var(ENV_RADIUS_MILES, "75");

    let file = config_file("search_radius_miles = 20.0");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    config.update_from_cli(CliConfigOverrides {
        search_radius_miles: Some(5.0),
        ..Default::default()
    });

    assert_eq!(config.search_radius_miles.value, 5.0);
    assert_eq!(config.search_radius_miles.source, ConfigSource::Cli);

    clear_env();
}
