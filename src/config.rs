//! Configuration types for the search client.
//!
//! Loaded once at startup from a TOML file. The bearer token normally comes
//! from the `TMDB_TOKEN` environment variable, which overrides the file.

use moviescout_tmdb::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the TMDB bearer token.
pub const TOKEN_ENV_VAR: &str = "TMDB_TOKEN";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "MOVIESCOUT_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// TMDB endpoint and credential settings.
    pub tmdb: TmdbConfig,
    /// Request cache settings.
    pub cache: CacheConfig,
}

/// TMDB connection settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent (None = `moviescout/<version>`).
    pub user_agent: Option<String>,
    /// Bearer token. Prefer `TMDB_TOKEN` over storing it in the file.
    pub token: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        let gateway = GatewayConfig::default();
        Self {
            base_url: gateway.base_url,
            timeout_seconds: gateway.timeout_seconds,
            user_agent: None,
            token: None,
        }
    }
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// In-memory request cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached result pages.
    pub max_entries: u64,
    /// How long a result page stays fresh, in seconds. 0 disables caching.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl_seconds: 300,
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ScoutError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ScoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the config file path: `$MOVIESCOUT_CONFIG`, else
    /// `dirs::config_dir()/moviescout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("moviescout").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("/tmp/moviescout-config/config.toml"))
    }

    /// Load the config at `path` if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> crate::error::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Full startup load: config file plus `TMDB_TOKEN` override.
    ///
    /// # Errors
    ///
    /// Same as [`ScoutConfig::load_or_default`], plus validation failures.
    pub fn load() -> crate::error::Result<Self> {
        let path = Self::default_config_path();
        let mut config = Self::load_or_default(&path)?;
        config.apply_token_override(std::env::var(TOKEN_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the file token with `token` when it is present and non-empty.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.tmdb.token = Some(token);
        }
    }

    /// Whether a bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.tmdb.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Build the gateway configuration. A missing token becomes an empty
    /// one, which fails at request time.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.tmdb.base_url.clone(),
            bearer_token: self.tmdb.token.clone().unwrap_or_default(),
            timeout_seconds: self.tmdb.timeout_seconds,
            user_agent: self.tmdb.user_agent.clone(),
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`](crate::ScoutError::Config) describing the first invalid field.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.gateway_config()
            .validate()
            .map_err(|e| crate::error::ScoutError::Config(e.to_string()))?;
        if self.cache.ttl_seconds > 0 && self.cache.max_entries == 0 {
            return Err(crate::error::ScoutError::Config(
                "cache.max_entries must be greater than 0 when caching is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_tmdb() {
        let config = ScoutConfig::default();
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.timeout_seconds, 10);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.cache.ttl_seconds, 300);
        assert!(!config.has_token());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn token_override_replaces_file_token() {
        let mut config = ScoutConfig::default();
        config.tmdb.token = Some("from-file".into());
        config.apply_token_override(Some("from-env".into()));
        assert_eq!(config.tmdb.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_token_override_is_ignored() {
        let mut config = ScoutConfig::default();
        config.tmdb.token = Some("from-file".into());
        config.apply_token_override(Some("   ".into()));
        config.apply_token_override(None);
        assert_eq!(config.tmdb.token.as_deref(), Some("from-file"));
    }

    #[test]
    fn missing_token_yields_empty_bearer() {
        let gateway = ScoutConfig::default().gateway_config();
        assert!(gateway.bearer_token.is_empty());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = ScoutConfig::default();
        config.tmdb.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_capacity_with_ttl_fails_validation() {
        let mut config = ScoutConfig::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());
        config.cache.ttl_seconds = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ScoutConfig = toml::from_str("[cache]\nttl_seconds = 0\n").expect("parse");
        assert_eq!(config.cache.ttl_seconds, 0);
        assert_eq!(config.cache.max_entries, 100);
        assert_eq!(config.tmdb.timeout_seconds, 10);
    }

    #[test]
    fn debug_redacts_token() {
        let mut config = ScoutConfig::default();
        config.tmdb.token = Some("secret-token".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = ScoutConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        if std::env::var_os(CONFIG_PATH_ENV_VAR).is_some() {
            return;
        }
        let path = ScoutConfig::default_config_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.ends_with("config.toml"));
        assert!(path_str.contains("moviescout"));
    }
}
