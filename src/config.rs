//! Runtime configuration from the environment and an optional `.env` file

use crate::app::SessionConfig;
use crate::constants::OAUTH_REDIRECT_URI;
use crate::utils::errors::ConfigError;
use crate::utils::oauth::OAuthConfig;
use std::path::PathBuf;

pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const ENV_DATA_DIR: &str = "SWIPERS_DATA_DIR";
pub const ENV_PLAYLIST_SYNC: &str = "SWIPERS_PLAYLIST_SYNC";
pub const ENV_MIN_POPULARITY: &str = "SWIPERS_MIN_POPULARITY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub oauth: OAuthConfig,
    pub data_dir: Option<PathBuf>,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("[Config] Loaded {}", path.display()),
            Err(e) if e.not_found() => log::debug!("[Config] No .env file, using environment only"),
            Err(e) => log::warn!("[Config] Ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let client_id = get(ENV_CLIENT_ID).ok_or(ConfigError::Missing(ENV_CLIENT_ID))?;
        let client_secret = get(ENV_CLIENT_SECRET).ok_or(ConfigError::Missing(ENV_CLIENT_SECRET))?;
        let redirect_uri = get(ENV_REDIRECT_URI).unwrap_or_else(|| OAUTH_REDIRECT_URI.to_string());

        let mut session = SessionConfig {
            playlist_sync: true,
            ..SessionConfig::default()
        };
        if let Some(raw) = get(ENV_PLAYLIST_SYNC) {
            session.playlist_sync = parse_bool(&raw).ok_or(ConfigError::Invalid {
                key: ENV_PLAYLIST_SYNC,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = get(ENV_MIN_POPULARITY) {
            session.pipeline.min_popularity = raw
                .parse::<u8>()
                .ok()
                .filter(|p| *p <= 100)
                .ok_or(ConfigError::Invalid {
                    key: ENV_MIN_POPULARITY,
                    value: raw.clone(),
                })?;
        }

        Ok(Self {
            oauth: OAuthConfig::new(client_id, client_secret, redirect_uri),
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from),
            session,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn requires_client_credentials() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_CLIENT_ID, "id")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_CLIENT_SECRET));
    }

    #[test]
    fn applies_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.oauth.redirect_uri, OAUTH_REDIRECT_URI);
        assert!(config.session.playlist_sync);
        assert_eq!(config.session.pipeline.min_popularity, 20);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_PLAYLIST_SYNC, "off"),
            (ENV_MIN_POPULARITY, "35"),
            (ENV_DATA_DIR, "/tmp/swipers"),
        ]))
        .unwrap();
        assert!(!config.session.playlist_sync);
        assert_eq!(config.session.pipeline.min_popularity, 35);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/swipers")));
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_MIN_POPULARITY, "250"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_MIN_POPULARITY, .. }));
    }
}
