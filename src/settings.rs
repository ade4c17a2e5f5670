use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "MFLIX_ENV";
const CONFIG_DIR_ENV: &str = "MFLIX_CONFIG_DIR";
const MONGODB_URI_ENV: &str = "MONGODB_URI";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(name: &str) -> anyhow::Result<Self> {
        match name {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay and `MFLIX_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("MFLIX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings = Self::from_config(cfg)?;
        settings.environment = Environment::parse(&environment)?;
        settings.server.base_path = normalize_base_path(&settings.server.base_path)?;

        // The deployment secret keeps its conventional name.
        if let Ok(uri) = std::env::var(MONGODB_URI_ENV) {
            settings.database.uri = uri;
        }

        Ok(settings)
    }

    pub fn from_config(cfg: config::Config) -> anyhow::Result<Self> {
        cfg.try_deserialize()
            .with_context(|| "failed to deserialize configuration")
    }
}

/// Trims trailing slashes; a non-empty prefix must start with `/` to be nested.
fn normalize_base_path(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.is_empty() && !trimmed.starts_with('/') {
        return Err(anyhow!(
            "server.base_path '{}' must be empty or start with '/'",
            raw
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    /// Prefix the API routes are mounted under; empty mounts them at the root.
    #[serde(default = "ServerSettings::default_base_path")]
    pub base_path: String,
    /// Origin allowed by CORS. No CORS layer is installed when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        4000
    }

    fn default_base_path() -> String {
        "/api".to_string()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            base_path: Self::default_base_path(),
            allowed_origin: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "DatabaseSettings::default_uri")]
    pub uri: String,
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
}

impl DatabaseSettings {
    fn default_uri() -> String {
        "mongodb://localhost:27017".to_string()
    }

    fn default_name() -> String {
        "sample_mflix".to_string()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            uri: Self::default_uri(),
            name: Self::default_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn defaults_point_at_sample_mflix() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
        assert_eq!(settings.database.backend, Backend::Mongo);
        assert_eq!(settings.database.name, "sample_mflix");
        assert_eq!(settings.server.address(), "0.0.0.0:4000");
        assert_eq!(settings.server.base_path, "/api");
        assert!(settings.server.allowed_origin.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let toml = r#"
            [server]
            port = 8081
            base_path = ""
            allowed_origin = "http://localhost:3000"

            [database]
            backend = "memory"

            [telemetry]
            log_format = "json"
        "#;
        let cfg = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        let settings = Settings::from_config(cfg).unwrap();

        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.base_path, "");
        assert_eq!(
            settings.server.allowed_origin.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(settings.database.backend, Backend::Memory);
        assert_eq!(settings.database.uri, "mongodb://localhost:27017");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(settings.telemetry.log_level, "info");
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("/api/").unwrap(), "/api");
        assert_eq!(normalize_base_path("/v1/mflix").unwrap(), "/v1/mflix");
        assert_eq!(normalize_base_path("").unwrap(), "");
        assert_eq!(normalize_base_path("/").unwrap(), "");
    }

    #[test]
    fn base_path_without_leading_slash_is_rejected() {
        let err = normalize_base_path("api").unwrap_err();
        assert!(err.to_string().contains("must be empty or start with '/'"));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!(Environment::parse("qa").is_err());
        assert_eq!(Environment::parse("production").unwrap(), Environment::Production);
    }
}
