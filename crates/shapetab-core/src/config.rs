use crate::error::{Result, ShapetabError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default ring simplification tolerance, in source coordinate units
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Default name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "shapetab.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which implementation performs the WGS 84 to Web Mercator transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Closed-form spherical Mercator
    #[default]
    Spherical,
    /// PROJ pipeline (requires the `proj` feature)
    Proj,
}

/// Layered configuration for shapetab
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub tolerance: ConfigValue<f64>,
    pub output_dir: ConfigValue<PathBuf>,
    pub output_file: ConfigValue<String>,
    pub transform: ConfigValue<TransformKind>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            tolerance: ConfigValue::new(DEFAULT_TOLERANCE, ConfigSource::Default),
            output_dir: ConfigValue::new(PathBuf::from("output_dir"), ConfigSource::Default),
            output_file: ConfigValue::new("output.xlsx".to_string(), ConfigSource::Default),
            transform: ConfigValue::new(TransformKind::Spherical, ConfigSource::Default),
        }
    }

    /// Defaults, then `shapetab.toml` in `dir` if present, then the environment
    pub fn load(dir: &Path) -> Result<Self> {
        let file = dir.join(CONFIG_FILE_NAME);
        let config = if file.exists() {
            Self::with_defaults().load_from_file(&file)?
        } else {
            Self::with_defaults()
        };
        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ShapetabError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ShapetabError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(tolerance) = file_config.tolerance {
            self.tolerance.update(validate_tolerance(tolerance)?, ConfigSource::File);
        }

        if let Some(output_dir) = file_config.output_dir {
            self.output_dir.update(output_dir, ConfigSource::File);
        }

        if let Some(output_file) = file_config.output_file {
            self.output_file.update(output_file, ConfigSource::File);
        }

        if let Some(transform) = file_config.transform {
            self.transform.update(transform, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SHAPETAB_TOLERANCE
        if let Ok(tolerance_str) = env::var("SHAPETAB_TOLERANCE") {
            match parse_tolerance(&tolerance_str) {
                Ok(tolerance) => self.tolerance.update(tolerance, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SHAPETAB_TOLERANCE value '{}': expected a non-negative number",
                    tolerance_str
                ),
            }
        }

        // SHAPETAB_OUTPUT_DIR
        if let Ok(output_dir) = env::var("SHAPETAB_OUTPUT_DIR") {
            self.output_dir.update(PathBuf::from(output_dir), ConfigSource::Environment);
        }

        // SHAPETAB_OUTPUT_FILE
        if let Ok(output_file) = env::var("SHAPETAB_OUTPUT_FILE") {
            self.output_file.update(output_file, ConfigSource::Environment);
        }

        // SHAPETAB_TRANSFORM
        if let Ok(transform_str) = env::var("SHAPETAB_TRANSFORM") {
            match parse_transform_kind(&transform_str) {
                Ok(kind) => self.transform.update(kind, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SHAPETAB_TRANSFORM value '{}': expected spherical or proj",
                    transform_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(tolerance) = overrides.tolerance {
            self.tolerance.update(tolerance, ConfigSource::Cli);
        }

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(output_dir, ConfigSource::Cli);
        }

        if let Some(output_file) = overrides.output_file {
            self.output_file.update(output_file, ConfigSource::Cli);
        }

        if let Some(transform) = overrides.transform {
            self.transform.update(transform, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "tolerance".to_string(),
            (self.tolerance.value.to_string(), self.tolerance.source),
        );

        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );

        map.insert(
            "output_file".to_string(),
            (self.output_file.value.clone(), self.output_file.source),
        );

        map.insert(
            "transform".to_string(),
            (format!("{:?}", self.transform.value).to_lowercase(), self.transform.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    tolerance: Option<f64>,
    output_dir: Option<PathBuf>,
    output_file: Option<String>,
    transform: Option<TransformKind>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub tolerance: Option<f64>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub transform: Option<TransformKind>,
}

/// Parse a simplification tolerance from string
pub fn parse_tolerance(s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| ShapetabError::ConfigInvalid {
        key: "tolerance".to_string(),
        reason: format!("Invalid tolerance: {}. Expected a number", s),
    })?;
    validate_tolerance(value)
}

fn validate_tolerance(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ShapetabError::ConfigInvalid {
            key: "tolerance".to_string(),
            reason: format!("Tolerance must be a finite non-negative number, got {}", value),
        });
    }
    Ok(value)
}

/// Parse transform kind from string
pub fn parse_transform_kind(s: &str) -> Result<TransformKind> {
    match s.to_lowercase().as_str() {
        "spherical" | "mercator" => Ok(TransformKind::Spherical),
        "proj" => Ok(TransformKind::Proj),
        _ => Err(ShapetabError::ConfigInvalid {
            key: "transform".to_string(),
            reason: format!("Invalid transform: {}. Use spherical or proj", s),
        }),
    }
}
