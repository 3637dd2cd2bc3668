//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (AFFLINK_*)
//! 2. TOML config file (if AFFLINK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::link::DEFAULT_AFFILIATE_TAG;

mod validation;

pub use validation::ConfigError;

/// Prefix of every shell cache generation name.
pub const GENERATION_PREFIX: &str = "afflink-shell";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (AFFLINK_*)
/// 2. TOML config file (if AFFLINK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Canonical affiliate id injected as `tag=<id>`.
    ///
    /// Set via AFFLINK_AFFILIATE_TAG environment variable.
    #[serde(default = "default_affiliate_tag")]
    pub affiliate_tag: String,

    /// Path to SQLite shell cache database.
    ///
    /// Set via AFFLINK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via AFFLINK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via AFFLINK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Origin the application shell is served from.
    ///
    /// Set via AFFLINK_APP_ORIGIN environment variable.
    #[serde(default = "default_app_origin")]
    pub app_origin: String,

    /// Build version tag naming the current cache generation.
    ///
    /// Set via AFFLINK_CACHE_VERSION environment variable.
    #[serde(default = "default_cache_version")]
    pub cache_version: String,

    /// Cross-origin font hosts whose responses may be cached.
    ///
    /// Set via AFFLINK_FONT_HOSTS environment variable.
    #[serde(default = "default_font_hosts")]
    pub font_hosts: Vec<String>,

    /// Application shell paths pre-cached on install.
    ///
    /// Set via AFFLINK_SHELL_MANIFEST environment variable.
    #[serde(default = "default_shell_manifest")]
    pub shell_manifest: Vec<String>,
}

fn default_affiliate_tag() -> String {
    DEFAULT_AFFILIATE_TAG.into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./afflink-cache.sqlite")
}

fn default_user_agent() -> String {
    "afflink/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_app_origin() -> String {
    "http://127.0.0.1:3000".into()
}

fn default_cache_version() -> String {
    "v1".into()
}

fn default_font_hosts() -> Vec<String> {
    vec!["fonts.googleapis.com".into(), "fonts.gstatic.com".into()]
}

fn default_shell_manifest() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/manifest.json",
        "/favicon.ico",
        "/favicon.svg",
        "/icons/apple-touch-icon.png",
        "/icons/icon-192x192.png",
        "/icons/icon-512x512.png",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            affiliate_tag: default_affiliate_tag(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            app_origin: default_app_origin(),
            cache_version: default_cache_version(),
            font_hosts: default_font_hosts(),
            shell_manifest: default_shell_manifest(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Name of the cache generation for this build.
    pub fn generation_name(&self) -> String {
        format!("{GENERATION_PREFIX}-{}", self.cache_version)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `AFFLINK_`
    /// 2. TOML file from `AFFLINK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("AFFLINK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("AFFLINK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.affiliate_tag, "syrez-21");
        assert_eq!(config.db_path, PathBuf::from("./afflink-cache.sqlite"));
        assert_eq!(config.user_agent, "afflink/0.1");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.app_origin, "http://127.0.0.1:3000");
        assert_eq!(config.cache_version, "v1");
        assert_eq!(config.font_hosts.len(), 2);
        assert_eq!(config.shell_manifest.len(), 8);
        assert_eq!(config.shell_manifest[0], "/");
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_generation_name() {
        let config = AppConfig { cache_version: "v2".into(), ..Default::default() };
        assert_eq!(config.generation_name(), "afflink-shell-v2");
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("afflink.toml", "affiliate_tag = \"mine-21\"\ncache_version = \"v7\"")?;
            jail.set_env("AFFLINK_CONFIG_FILE", "afflink.toml");
            jail.set_env("AFFLINK_TIMEOUT_MS", "5000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.affiliate_tag, "mine-21");
            assert_eq!(config.cache_version, "v7");
            assert_eq!(config.timeout_ms, 5000);
            Ok(())
        });
    }
}
