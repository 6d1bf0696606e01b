use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "bookswap.toml",
    "config/bookswap.toml",
    "crates/config/bookswap.toml",
    "../bookswap.toml",
    "../config/bookswap.toml",
    "../crates/config/bookswap.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://bookswap.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            token_ttl_seconds: Self::default_token_ttl(),
        }
    }
}

impl AuthConfig {
    fn default_jwt_secret() -> String {
        "change-me-development-secret".to_string()
    }

    const fn default_token_ttl() -> u64 {
        3600
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// std::env::remove_var("BOOKSWAP_CONFIG");
/// std::env::remove_var("PORT");
///
/// let config = bookswap_config::load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// assert_eq!(config.auth.token_ttl_seconds, 3600);
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())
        .unwrap()
        .set_default(
            "auth.token_ttl_seconds",
            i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX),
        )
        .unwrap();

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("BOOKSWAP_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via BOOKSWAP_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(config::Environment::with_prefix("BOOKSWAP").separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    apply_process_env(&mut config)?;

    debug!(address = %config.http.address, port = config.http.port, "loaded backend configuration");
    Ok(config)
}

/// The port and signing secret are also honored as bare `PORT` / `JWT_SECRET`
/// variables, the documented deployment surface.
fn apply_process_env(config: &mut AppConfig) -> anyhow::Result<()> {
    if let Ok(port) = std::env::var("PORT") {
        config.http.port = port
            .parse()
            .with_context(|| format!("PORT is not a valid port number: {port}"))?;
    }

    if let Ok(secret) = std::env::var("JWT_SECRET") {
        if !secret.is_empty() {
            config.auth.jwt_secret = secret;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_without_file_or_environment() {
        std::env::remove_var("BOOKSWAP_CONFIG");
        std::env::remove_var("PORT");
        std::env::remove_var("JWT_SECRET");

        let config = load().expect("load defaults");

        assert_eq!(config.http.address, "127.0.0.1");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.database.url, "sqlite://bookswap.db");
        assert_eq!(config.auth.token_ttl_seconds, 3600);
    }

    #[test]
    #[serial]
    fn bare_process_variables_override_defaults() {
        std::env::remove_var("BOOKSWAP_CONFIG");
        std::env::set_var("PORT", "8081");
        std::env::set_var("JWT_SECRET", "s3cret-from-env");

        let config = load().expect("load with env overrides");

        assert_eq!(config.http.port, 8081);
        assert_eq!(config.auth.jwt_secret, "s3cret-from-env");

        std::env::remove_var("PORT");
        std::env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial]
    fn invalid_port_is_rejected() {
        std::env::remove_var("BOOKSWAP_CONFIG");
        std::env::set_var("PORT", "not-a-port");

        let result = load();
        std::env::remove_var("PORT");

        assert!(result.is_err());
    }
}
