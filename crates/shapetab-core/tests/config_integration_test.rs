//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use shapetab_core::config::{
    CliConfigOverrides, ConfigSource, LayeredConfig, TransformKind, CONFIG_FILE_NAME,
};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn clear_env() {
    env::remove_var("SHAPETAB_TOLERANCE");
    env::remove_var("SHAPETAB_OUTPUT_DIR");
    env::remove_var("SHAPETAB_OUTPUT_FILE");
    env::remove_var("SHAPETAB_TRANSFORM");
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
tolerance = 0.01
# Only override tolerance, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.tolerance.value, 0.01);
    assert_eq!(config.tolerance.source, ConfigSource::File);
    assert_eq!(config.output_file.value, "output.xlsx");
    assert_eq!(config.output_file.source, ConfigSource::Default);
    assert_eq!(config.transform.source, ConfigSource::Default);
}

#[test]
fn test_malformed_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "tolerance = [not toml").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
tolerance = 0.01
output_file = "from-file.xlsx"
"#
    )
    .unwrap();

    env::set_var("SHAPETAB_TOLERANCE", "0.05");
    env::set_var("SHAPETAB_TRANSFORM", "proj");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.tolerance.value, 0.05);
    assert_eq!(config.tolerance.source, ConfigSource::Environment);
    assert_eq!(config.transform.value, TransformKind::Proj);
    assert_eq!(config.transform.source, ConfigSource::Environment);
    assert_eq!(config.output_file.value, "from-file.xlsx");
    assert_eq!(config.output_file.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();

    env::set_var("SHAPETAB_TOLERANCE", "-3");
    env::set_var("SHAPETAB_TRANSFORM", "utm");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.tolerance.value, 0.001);
    assert_eq!(config.tolerance.source, ConfigSource::Default);
    assert_eq!(config.transform.value, TransformKind::Spherical);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();

    env::set_var("SHAPETAB_OUTPUT_DIR", "/tmp/env-out");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        output_dir: Some(PathBuf::from("/tmp/cli-out")),
        ..Default::default()
    });

    assert_eq!(config.output_dir.value, PathBuf::from("/tmp/cli-out"));
    assert_eq!(config.output_dir.source, ConfigSource::Cli);

    clear_env();
}

#[test]
#[serial]
fn test_load_picks_up_config_file_in_directory() {
    clear_env();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "output_file = \"dir.xlsx\"\n").unwrap();

    let config = LayeredConfig::load(dir.path()).unwrap();
    assert_eq!(config.output_file.value, "dir.xlsx");
    assert_eq!(config.output_file.source, ConfigSource::File);

    let empty = TempDir::new().unwrap();
    let config = LayeredConfig::load(empty.path()).unwrap();
    assert_eq!(config.output_file.source, ConfigSource::Default);
}
