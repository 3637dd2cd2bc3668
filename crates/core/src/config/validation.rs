//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `affiliate_tag` is empty or contains whitespace, `&`, `=` or `#`
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `cache_version` is empty
    /// - `app_origin` is not an http(s) URL with a host
    /// - a `shell_manifest` entry does not start with `/`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.affiliate_tag.is_empty() {
            return Err(ConfigError::Invalid { field: "affiliate_tag".into(), reason: "must not be empty".into() });
        }
        if self
            .affiliate_tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '&' | '=' | '#'))
        {
            return Err(ConfigError::Invalid {
                field: "affiliate_tag".into(),
                reason: "must not contain whitespace, '&', '=' or '#'".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache_version.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "cache_version".into(), reason: "must not be empty".into() });
        }

        match url::Url::parse(&self.app_origin) {
            Ok(origin) if matches!(origin.scheme(), "http" | "https") && origin.host_str().is_some() => {}
            _ => {
                return Err(ConfigError::Invalid {
                    field: "app_origin".into(),
                    reason: "must be an http(s) URL with a host".into(),
                });
            }
        }

        if let Some(path) = self.shell_manifest.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid {
                field: "shell_manifest".into(),
                reason: format!("path {path:?} must start with '/'"),
            });
        }

        if self.shell_manifest.is_empty() {
            tracing::warn!("shell_manifest is empty; install will cache nothing");
        }

        Ok(())
    }
}
