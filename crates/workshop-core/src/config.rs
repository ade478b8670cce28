//! Application Configuration
//!
//! Loaded from TOML. Every key is optional and falls back to its default,
//! so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::page::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST root, without trailing slash
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// 0 keeps toasts until dismissed
    pub dismiss_after_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { dismiss_after_ms: 4000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
    /// Records kept in memory
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            capacity: 500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub toast: ToastConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> CoreResult<Self> {
        let mut config: AppConfig = toml::from_str(raw).map_err(|e| CoreError::Config(e.to_string()))?;
        config.api.base_url = config.api.base_url.trim().trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.api.base_url.is_empty() {
            return Err(CoreError::Config("api.base_url must not be empty".to_string()));
        }
        if self.list.page_size == 0 {
            return Err(CoreError::Config("list.page_size must be at least 1".to_string()));
        }
        if self.log_level().is_none() {
            return Err(CoreError::Config(format!("unknown log.level {:?}", self.log.level)));
        }
        Ok(())
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log.level.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.log_level(), Some(log::LevelFilter::Info));
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://garage.example/api/"

            [list]
            page_size = 25

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://garage.example/api");
        assert_eq!(config.list.page_size, 25);
        assert_eq!(config.toast.dismiss_after_ms, 4000);
        assert_eq!(config.log.capacity, 500);
        assert_eq!(config.log_level(), Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = AppConfig::from_toml_str("[list]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(m) if m.contains("page_size")));
    }

    #[test]
    fn test_bad_level_and_syntax() {
        assert!(AppConfig::from_toml_str("[log]\nlevel = \"loud\"\n").is_err());
        assert!(AppConfig::from_toml_str("[list\n").is_err());
    }
}
