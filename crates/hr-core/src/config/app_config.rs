use std::path::PathBuf;

/// Backend API section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the HR API (may be empty - a fact, not an error)
    pub base_url: String,

    /// Bearer token sent with every request; empty means anonymous
    pub token: String,

    /// Per-request timeout in milliseconds (0 = not configured)
    pub request_timeout_ms: u64,
}

/// Enrollment flow section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentConfig {
    pub max_attempts: u32,
    pub poll_interval_ms: u64,
    pub success_auto_close_ms: u64,
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub enrollment: EnrollmentConfig,

    /// Log directory (path info only, no existence check)
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation or default
    /// value logic. Missing keys become empty strings and zeroes.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str| toml_value.get(name);
        let str_at = |sec: &str, key: &str| {
            section(sec)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |sec: &str, key: &str| {
            section(sec)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0)
        };

        Ok(Self {
            api: ApiConfig {
                base_url: str_at("api", "base_url"),
                token: str_at("api", "token"),
                request_timeout_ms: int_at("api", "request_timeout_ms") as u64,
            },
            enrollment: EnrollmentConfig {
                max_attempts: int_at("enrollment", "max_attempts").min(u32::MAX as i64) as u32,
                poll_interval_ms: int_at("enrollment", "poll_interval_ms") as u64,
                success_auto_close_ms: int_at("enrollment", "success_auto_close_ms") as u64,
            },
            log_dir: PathBuf::from(str_at("logging", "dir")),
        })
    }

    /// Create empty AppConfig (all empty/zero values)
    pub fn empty() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                token: String::new(),
                request_timeout_ms: 0,
            },
            enrollment: EnrollmentConfig {
                max_attempts: 0,
                poll_interval_ms: 0,
                success_auto_close_ms: 0,
            },
            log_dir: PathBuf::new(),
        }
    }
}
