use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::analysis::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::analysis::GeminiConfig;

pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Runtime settings gathered once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub log_dir: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Build the configuration from a key lookup, usually the process environment.
    ///
    /// `GEMINI_API_KEY` wins over the legacy `API_KEY`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let debug = value("DEBUG").is_some_and(|flag| {
            !matches!(flag.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
        });

        Self {
            api_key: value("GEMINI_API_KEY").or_else(|| value("API_KEY")),
            model: value("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: value("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            log_dir: value("LOG_DIR").map_or_else(|| PathBuf::from(DEFAULT_LOG_DIR), PathBuf::from),
            debug,
        }
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
        }
    }

    pub const fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Initializes the application configuration
/// Loads `.env` (if present) and reads the process environment
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.api_key, None);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, "https://generativelanguage.googleapis.com");
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
        assert!(!config.debug);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn gemini_key_wins_over_legacy_key() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_KEY", "legacy"),
            ("GEMINI_API_KEY", "primary"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let legacy_only = AppConfig::from_lookup(lookup_from(&[("API_KEY", "legacy")]));
        assert_eq!(legacy_only.api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "   "),
            ("GEMINI_MODEL", ""),
            ("DEBUG", "0"),
        ]));

        assert_eq!(config.api_key, None);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(!config.debug);
    }

    #[test]
    fn debug_flag_ignores_case() {
        for off in ["FALSE", "False", "no", "Off"] {
            let config = AppConfig::from_lookup(lookup_from(&[("DEBUG", off)]));
            assert!(!config.debug, "DEBUG={off} should disable debug logging");
        }

        let config = AppConfig::from_lookup(lookup_from(&[("DEBUG", "TRUE")]));
        assert!(config.debug);
    }

    #[test]
    fn overrides_flow_into_gemini_config() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_API_BASE", "http://localhost:8080"),
            ("LOG_DIR", "/tmp/mena"),
            ("DEBUG", "1"),
        ]));

        let gemini = config.gemini();
        assert_eq!(gemini.api_key.as_deref(), Some("key"));
        assert_eq!(gemini.model, "gemini-2.5-pro");
        assert_eq!(gemini.api_base, "http://localhost:8080");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/mena"));
        assert_eq!(config.log_level(), "debug");
    }
}
