use actix_web::cookie::Key;
use thiserror::Error;

/// Minimum key material accepted by `cookie::Key::from`.
const SESSION_SECRET_MIN_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("DIARY_STORE must be 'mongodb' or 'memory', got '{0}'")]
    UnknownStore(String),

    #[error("SESSION_SECRET must be at least 64 bytes, got {0}")]
    SessionSecretTooShort(usize),

    #[error("COOKIE_SECURE must be 'true' or 'false', got '{0}'")]
    InvalidBool(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub store: StoreBackend,
    pub session_secret: Option<String>,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        let store = match lookup("DIARY_STORE").as_deref() {
            None | Some("mongodb") => StoreBackend::Mongo,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let session_secret = lookup("SESSION_SECRET").filter(|s| !s.is_empty());
        if let Some(secret) = &session_secret {
            if secret.len() < SESSION_SECRET_MIN_LEN {
                return Err(ConfigError::SessionSecretTooShort(secret.len()));
            }
        }

        let cookie_secure = match lookup("COOKIE_SECURE").as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => return Err(ConfigError::InvalidBool(other.to_string())),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://127.0.0.1:27017/diaryApp".to_string()),
            store,
            session_secret,
            cookie_name: lookup("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| "diary_session".to_string()),
            cookie_secure,
        })
    }

    /// Signing/encryption key for the session cookie.
    pub fn session_key(&self) -> Key {
        match &self.session_secret {
            Some(secret) => Key::from(secret.as_bytes()),
            None => {
                log::warn!("⚠️ SESSION_SECRET not set, generated a random key; sessions will not survive a restart");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_a_local_deployment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.mongodb_uri, "mongodb://127.0.0.1:27017/diaryApp");
        assert_eq!(config.store, StoreBackend::Mongo);
        assert_eq!(config.cookie_name, "diary_session");
        assert!(!config.cookie_secure);
        assert!(config.session_secret.is_none());
    }

    #[test]
    fn reads_overrides() {
        let secret = "k".repeat(64);
        let config = config_from(&[
            ("PORT", "8080"),
            ("DIARY_STORE", "memory"),
            ("SESSION_SECRET", &secret),
            ("COOKIE_SECURE", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.cookie_secure);
        assert_eq!(config.session_secret.as_deref(), Some(secret.as_str()));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[("PORT", "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert_eq!(
            config_from(&[("DIARY_STORE", "redis")]).unwrap_err(),
            ConfigError::UnknownStore("redis".to_string())
        );
        assert_eq!(
            config_from(&[("SESSION_SECRET", "short")]).unwrap_err(),
            ConfigError::SessionSecretTooShort(5)
        );
        assert_eq!(
            config_from(&[("COOKIE_SECURE", "yes")]).unwrap_err(),
            ConfigError::InvalidBool("yes".to_string())
        );
    }
}
