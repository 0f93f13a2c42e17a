//! Configuration loading.
//!
//! Config lives at `~/.begrepsbro/config.json`. Every section is optional;
//! missing fields take their defaults. Environment variables (including a
//! `.env` file loaded by the binary) override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::config::ApiConfig;
use crate::error::{BroError, Result};

/// Default model for the OpenAI-compatible backend.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default model for the Gemini backend.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub providers: ProviderConfig,
    pub api: ApiConfig,
    pub history: HistoryConfig,
}

/// Which structured-output API to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderBackend {
    #[default]
    #[serde(alias = "open_ai")]
    OpenAi,
    Gemini,
}

impl std::str::FromStr for ProviderBackend {
    type Err = BroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "open_ai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(BroError::Config(format!("unknown provider backend '{other}'"))),
        }
    }
}

/// Provider settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub backend: ProviderBackend,
    /// API key. Falls back to the backend's usual env var when unset.
    pub api_key: Option<String>,
    /// Model name. Falls back to the backend default when unset.
    pub model: Option<String>,
    /// Override the API base URL (proxies, OpenAI-compatible servers).
    pub api_base: Option<String>,
    /// HTTP client timeout for one generation call.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: ProviderBackend::default(),
            api_key: None,
            model: None,
            api_base: None,
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Configured model, or the backend default.
    pub fn resolved_model(&self) -> &str {
        match (&self.model, self.backend) {
            (Some(m), _) if !m.trim().is_empty() => m.as_str(),
            (_, ProviderBackend::OpenAi) => DEFAULT_OPENAI_MODEL,
            (_, ProviderBackend::Gemini) => DEFAULT_GEMINI_MODEL,
        }
    }
}

/// History (recency cache) settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Directory holding the history file. Defaults to [`Config::dir`].
    pub dir: Option<PathBuf>,
}

impl HistoryConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(Config::dir)
    }
}

impl Config {
    /// `~/.begrepsbro`
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".begrepsbro")
    }

    /// `~/.begrepsbro/config.json`
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from the default path and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                BroError::Config(format!("invalid config at {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(BroError::Config(format!(
                "failed to read config at {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Apply `BEGREPSBRO_*` overrides using `lookup` to read variables.
    ///
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("BEGREPSBRO_BACKEND").and_then(|v| v.parse().ok()) {
            self.providers.backend = backend;
        }
        if let Some(model) = get("BEGREPSBRO_MODEL") {
            self.providers.model = Some(model);
        }
        if let Some(key) = get("BEGREPSBRO_API_KEY") {
            self.providers.api_key = Some(key);
        }
        if let Some(base) = get("BEGREPSBRO_API_BASE") {
            self.providers.api_base = Some(base);
        }
        if let Some(port) = get("BEGREPSBRO_API_PORT").and_then(|v| v.parse().ok()) {
            self.api.port = port;
        }
        if let Some(dir) = get("BEGREPSBRO_HISTORY_DIR") {
            self.history.dir = Some(PathBuf::from(dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.providers.backend, ProviderBackend::OpenAi);
        assert_eq!(cfg.providers.timeout_secs, 60);
        assert_eq!(cfg.providers.resolved_model(), DEFAULT_OPENAI_MODEL);
        assert!(cfg.history.dir.is_none());
    }

    #[test]
    fn test_resolved_model_per_backend() {
        let mut providers = ProviderConfig {
            backend: ProviderBackend::Gemini,
            ..Default::default()
        };
        assert_eq!(providers.resolved_model(), DEFAULT_GEMINI_MODEL);
        providers.model = Some("gemini-2.5-pro".into());
        assert_eq!(providers.resolved_model(), "gemini-2.5-pro");
        providers.model = Some("  ".into());
        assert_eq!(providers.resolved_model(), DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::load_from_path(&tmp.path().join("config.json")).unwrap();
        assert_eq!(cfg.providers.backend, ProviderBackend::OpenAi);
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"providers": {"backend": "gemini"}, "api": {"port": 8080}}"#,
        )
        .unwrap();
        let cfg = Config::load_from_path(&path).unwrap();
        assert_eq!(cfg.providers.backend, ProviderBackend::Gemini);
        assert_eq!(cfg.providers.timeout_secs, 60);
        assert_eq!(cfg.api.port, 8080);
        assert_eq!(cfg.api.bind, "127.0.0.1");
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, BroError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BEGREPSBRO_BACKEND", "gemini"),
            ("BEGREPSBRO_MODEL", "gemini-2.5-flash"),
            ("BEGREPSBRO_API_PORT", "7000"),
            ("BEGREPSBRO_HISTORY_DIR", "/tmp/begrepsbro-history"),
            ("BEGREPSBRO_API_KEY", ""),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.providers.backend, ProviderBackend::Gemini);
        assert_eq!(cfg.providers.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(cfg.api.port, 7000);
        assert_eq!(
            cfg.history.resolved_dir(),
            PathBuf::from("/tmp/begrepsbro-history")
        );
        // Blank values are ignored.
        assert!(cfg.providers.api_key.is_none());
    }

    #[test]
    fn test_bad_override_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_overrides(|k| match k {
            "BEGREPSBRO_BACKEND" => Some("llama".into()),
            "BEGREPSBRO_API_PORT" => Some("not-a-port".into()),
            _ => None,
        });
        assert_eq!(cfg.providers.backend, ProviderBackend::OpenAi);
        assert_eq!(cfg.api.port, ApiConfig::default().port);
    }

    #[test]
    fn test_provider_config_debug_redacts_key() {
        let cfg = ProviderConfig {
            api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("REDACTED"));
    }
}
