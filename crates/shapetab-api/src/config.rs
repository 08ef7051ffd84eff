use shapetab_core::config::LayeredConfig;
use shapetab_core::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Default listen port
pub const DEFAULT_PORT: u16 = 3001;

/// Default upload limit in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: usize = 256;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Conversion settings shared with the CLI
    pub conversion: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Conversion settings come from `shapetab.toml` in `config_dir` (if
    /// present) overlaid with the `SHAPETAB_*` environment.
    pub fn from_env(config_dir: &Path) -> Result<Self> {
        let host = env::var("SHAPETAB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SHAPETAB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let max_upload_mb = env::var("SHAPETAB_MAX_UPLOAD_MB")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);

        Ok(Self {
            host,
            port,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            conversion: LayeredConfig::load(config_dir)?,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory the spreadsheet is written into
    pub fn output_dir(&self) -> PathBuf {
        self.conversion.output_dir.value.clone()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            conversion: LayeredConfig::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("SHAPETAB_HOST");
        env::remove_var("SHAPETAB_PORT");
        env::remove_var("SHAPETAB_MAX_UPLOAD_MB");
        env::remove_var("SHAPETAB_OUTPUT_DIR");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let dir = tempfile::TempDir::new().unwrap();

        let config = ApiConfig::from_env(dir.path()).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.max_upload_bytes, 256 * 1024 * 1024);
        assert_eq!(config.output_dir(), PathBuf::from("output_dir"));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("SHAPETAB_HOST", "127.0.0.1");
        env::set_var("SHAPETAB_PORT", "8080");
        env::set_var("SHAPETAB_MAX_UPLOAD_MB", "10");
        env::set_var("SHAPETAB_OUTPUT_DIR", "/tmp/shapetab-api");
        let dir = tempfile::TempDir::new().unwrap();

        let config = ApiConfig::from_env(dir.path()).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/shapetab-api"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        clear_env();
        env::set_var("SHAPETAB_PORT", "not-a-port");
        let dir = tempfile::TempDir::new().unwrap();

        let config = ApiConfig::from_env(dir.path()).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        clear_env();
    }
}
