//! HTTP API configuration types.

use serde::{Deserialize, Serialize};

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address (default: 127.0.0.1).
    pub bind: String,
    /// Port for the API server.
    pub port: u16,
    /// Browser origin allowed by CORS (the frontend serving the UI).
    pub allowed_origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 9091,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.port, 9091);
        assert_eq!(cfg.bind, "127.0.0.1");
        assert_eq!(cfg.allowed_origin, "http://localhost:3000");
        assert_eq!(cfg.addr(), "127.0.0.1:9091");
    }

    #[test]
    fn test_api_config_deserialize_partial() {
        let json = r#"{"port": 3001}"#;
        let cfg: ApiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.bind, "127.0.0.1"); // default
    }
}
