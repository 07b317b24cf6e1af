//! # Configuration Loader
//!
//! Reads the TOML file into the [`AppConfig`] DTO. Accepts whatever is in the
//! file: no validation, no defaults. Policy is resolved by the consumers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hr_core::config::AppConfig;

pub const CONFIG_PATH_ENV: &str = "HRCONSOLE_CONFIG";
pub const API_BASE_URL_ENV: &str = "HRCONSOLE_API_BASE_URL";
pub const API_TOKEN_ENV: &str = "HRCONSOLE_API_TOKEN";

const APP_DIR_NAME: &str = "hrconsole";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `HRCONSOLE_CONFIG`, else `<platform config dir>/hrconsole/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Load the file if there is one; a missing file yields an empty config.
pub fn load_or_empty(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) if path.exists() => load_config(path.to_path_buf()),
        Some(path) => {
            tracing::debug!(path = %path.display(), "config file not found, using empty config");
            Ok(AppConfig::empty())
        }
        None => Ok(AppConfig::empty()),
    }
}

/// Environment values win over the file's `[api]` section.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(base_url) = std::env::var(API_BASE_URL_ENV) {
        config.api.base_url = base_url;
    }
    if let Ok(token) = std::env::var(API_TOKEN_ENV) {
        config.api.token = token;
    }
}

/// Configured log directory, else the platform data dir.
pub fn resolve_log_dir(config: &AppConfig) -> Option<PathBuf> {
    if !config.log_dir.as_os_str().is_empty() {
        return Some(config.log_dir.clone());
    }
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://hr.example.com/api"
            token = "abc"
            request_timeout_ms = 5000

            [enrollment]
            max_attempts = 10
            poll_interval_ms = 500

            [logging]
            dir = "/tmp/hrconsole-logs"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api.base_url, "https://hr.example.com/api");
        assert_eq!(config.api.token, "abc");
        assert_eq!(config.api.request_timeout_ms, 5000);
        assert_eq!(config.enrollment.max_attempts, 10);
        assert_eq!(config.enrollment.poll_interval_ms, 500);
        assert_eq!(config.enrollment.success_auto_close_ms, 0);
        assert_eq!(
            resolve_log_dir(&config),
            Some(PathBuf::from("/tmp/hrconsole-logs"))
        );
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\nbase_url = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(PathBuf::from("/nonexistent/hrconsole.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_file_yields_empty_config() {
        let config = load_or_empty(Some(Path::new("/nonexistent/hrconsole.toml"))).unwrap();
        assert_eq!(config, AppConfig::empty());
    }
}
