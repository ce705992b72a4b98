//! Layered configuration for henhouse.
//!
//! Settings are read from `.henhouse/henhouse.toml` under the project
//! directory and layered file → environment → CLI:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! The API base URL resolves in this order:
//! 1. `--api-url`
//! 2. `HENHOUSE_API_URL` (a `.env` file is honoured)
//! 3. `[api] base_url` from the config file
//! 4. `HENHOUSE_API_URL` as seen at build time
//! 5. `http://localhost:8000`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "HENHOUSE_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// `[api]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the farm REST service
    #[serde(default)]
    pub base_url: Option<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// On-disk shape of `henhouse.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HenhouseToml {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HenhouseToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    /// The file written by `henhouse config init`.
    pub fn starter() -> Self {
        Self {
            api: ApiConfig {
                base_url: Some(DEFAULT_API_URL.to_string()),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Non-fatal problems worth showing to the user.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(url) = self.api.base_url.as_deref().filter(|u| !is_http_url(u)) {
            warnings.push(format!(
                "api.base_url '{}' is not an http:// or https:// URL",
                url
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            warnings.push(format!(
                "logging.level '{}' is not one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        warnings
    }
}

pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn get_henhouse_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(".henhouse")
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    get_henhouse_dir(project_dir).join("henhouse.toml")
}

/// Where a resolved base URL came from, for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Cli,
    Env,
    File,
    BuildTime,
    Default,
}

impl std::fmt::Display for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlSource::Cli => write!(f, "--api-url"),
            UrlSource::Env => write!(f, "{}", API_URL_ENV),
            UrlSource::File => write!(f, "config file"),
            UrlSource::BuildTime => write!(f, "build-time {}", API_URL_ENV),
            UrlSource::Default => write!(f, "default"),
        }
    }
}

/// Effective runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub config_file: PathBuf,
    pub api_url: String,
    pub api_url_source: UrlSource,
    pub log_level: String,
    pub verbose: bool,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn new(project_dir: PathBuf, cli_api_url: Option<String>, verbose: bool) -> Result<Self> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::with_env(project_dir, cli_api_url, verbose, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn with_env(
        project_dir: PathBuf,
        cli_api_url: Option<String>,
        verbose: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_file = config_path(&project_dir);
        let toml = HenhouseToml::load_or_default(&config_file)?;

        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (api_url, api_url_source) = if let Some(url) = non_empty(cli_api_url) {
            (url, UrlSource::Cli)
        } else if let Some(url) = non_empty(env(API_URL_ENV)) {
            (url, UrlSource::Env)
        } else if let Some(url) = non_empty(toml.api.base_url.clone()) {
            (url, UrlSource::File)
        } else if let Some(url) = option_env!("HENHOUSE_API_URL").filter(|s| !s.is_empty()) {
            (url.to_string(), UrlSource::BuildTime)
        } else {
            (DEFAULT_API_URL.to_string(), UrlSource::Default)
        };

        Ok(Self {
            project_dir,
            config_file,
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            api_url_source,
            log_level: toml.logging.level,
            verbose,
        })
    }

    /// Filter directive for the tracing subscriber when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> String {
        if self.verbose {
            "henhouse=debug".to_string()
        } else {
            format!("henhouse={}", self.log_level.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &Path, content: &str) {
        let henhouse_dir = get_henhouse_dir(dir);
        fs::create_dir_all(&henhouse_dir).unwrap();
        fs::write(henhouse_dir.join("henhouse.toml"), content).unwrap();
    }

    #[test]
    fn test_cli_url_wins() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[api]\nbase_url = \"http://file:1\"\n");
        let config = Config::with_env(
            dir.path().to_path_buf(),
            Some("http://cli:1/".into()),
            false,
            |_| Some("http://env:1".into()),
        )
        .unwrap();
        assert_eq!(config.api_url, "http://cli:1");
        assert_eq!(config.api_url_source, UrlSource::Cli);
    }

    #[test]
    fn test_env_beats_file() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[api]\nbase_url = \"http://file:1\"\n");
        let config = Config::with_env(dir.path().to_path_buf(), None, false, |key| {
            (key == API_URL_ENV).then(|| "http://env:1".to_string())
        })
        .unwrap();
        assert_eq!(config.api_url, "http://env:1");
        assert_eq!(config.api_url_source, UrlSource::Env);
    }

    #[test]
    fn test_file_used_when_no_overrides() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            "[api]\nbase_url = \"http://file:1//\"\n[logging]\nlevel = \"info\"\n",
        );
        let config = Config::with_env(dir.path().to_path_buf(), None, false, no_env).unwrap();
        assert_eq!(config.api_url, "http://file:1");
        assert_eq!(config.api_url_source, UrlSource::File);
        assert_eq!(config.log_directive(), "henhouse=info");
    }

    #[test]
    fn test_blank_values_fall_through() {
        let dir = tempdir().unwrap();
        let config = Config::with_env(dir.path().to_path_buf(), Some("  ".into()), false, |_| {
            Some(String::new())
        })
        .unwrap();
        assert!(matches!(
            config.api_url_source,
            UrlSource::BuildTime | UrlSource::Default
        ));
    }

    #[test]
    fn test_verbose_forces_debug() {
        let dir = tempdir().unwrap();
        let config = Config::with_env(dir.path().to_path_buf(), None, true, no_env).unwrap();
        assert_eq!(config.log_directive(), "henhouse=debug");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[api\nbase_url = ");
        let result = Config::with_env(dir.path().to_path_buf(), None, false, no_env);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config file")
        );
    }

    #[test]
    fn test_validate_flags_bad_url_and_level() {
        let toml = HenhouseToml {
            api: ApiConfig {
                base_url: Some("farm.local".into()),
            },
            logging: LoggingConfig {
                level: "loud".into(),
            },
        };
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("farm.local"));
        assert!(warnings[1].contains("loud"));
    }

    #[test]
    fn test_starter_is_valid_and_roundtrips() {
        let dir = tempdir().unwrap();
        let path = config_path(dir.path());
        HenhouseToml::starter().save(&path).unwrap();
        let loaded = HenhouseToml::load(&path).unwrap();
        assert!(loaded.validate().is_empty());
        assert_eq!(loaded.api.base_url.as_deref(), Some(DEFAULT_API_URL));
    }
}
