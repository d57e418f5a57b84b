// src/config.rs

use std::env;

use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT musi być liczbą z zakresu 0-65535, otrzymano: {0}")]
    InvalidPort(String),

    #[error("BACKEND_URL jest nieprawidłowy ({value}): {reason}")]
    InvalidBackendUrl { value: String, reason: String },
}

/// Konfiguracja bramki wczytywana raz przy starcie procesu.
///
/// | Zmienna        | Domyślnie               |
/// |----------------|-------------------------|
/// | `HOST`         | `0.0.0.0`               |
/// | `PORT`         | `3000`                  |
/// | `BACKEND_URL`  | `http://localhost:8000` |
/// | `CORS_ORIGINS` | `http://localhost:3000` |
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: Url,
    pub cors_origins: Vec<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Buduje konfigurację z dowolnego źródła par klucz-wartość (w testach zamiast `env`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port_raw = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let backend_raw = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_backend_url(&backend_raw)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            backend_url,
            cors_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBackendUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBackendUrl {
            value: raw.to_string(),
            reason: format!("nieobsługiwany schemat '{}'", other),
        }),
    }
}
