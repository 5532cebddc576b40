use std::env;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Which backend the client talks to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    Development,
    #[default]
    Production,
}

impl ApiMode {
    pub fn toggled(self) -> Self {
        match self {
            ApiMode::Development => ApiMode::Production,
            ApiMode::Production => ApiMode::Development,
        }
    }
}

impl Display for ApiMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ApiMode::Development => write!(f, "development"),
            ApiMode::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    #[serde(default)]
    pub mode: ApiMode,
    pub development_url: String,
    pub production_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

impl Api {
    pub fn url(&self, mode: ApiMode) -> &str {
        match mode {
            ApiMode::Development => &self.development_url,
            ApiMode::Production => &self.production_url,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    pub path: String,
    #[serde(default = "default_remember_credentials")]
    pub remember_credentials: bool,
}

fn default_remember_credentials() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    pub storage: Storage,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("ALARMSYNC").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [logger]
        level = "debug"

        [api]
        mode = "development"
        development_url = "http://127.0.0.1:3000"
        production_url = "https://alarms.example.com"

        [storage]
        path = "session.json"
    "#;

    #[test]
    fn test_from_toml_defaults() {
        let settings = Settings::from_toml(SAMPLE).unwrap();

        assert_eq!(settings.api.mode, ApiMode::Development);
        assert_eq!(settings.api.timeout(), Duration::from_secs(10));
        assert_eq!(settings.api.connect_timeout(), Duration::from_secs(5));
        assert!(settings.storage.remember_credentials);
        assert_eq!(
            settings.api.url(settings.api.mode),
            "http://127.0.0.1:3000"
        );
        assert_eq!(
            settings.api.url(ApiMode::Production),
            "https://alarms.example.com"
        );
    }

    #[test]
    fn test_missing_section_is_error() {
        assert!(Settings::from_toml("[logger]\nlevel = \"info\"").is_err());
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(ApiMode::Production.toggled(), ApiMode::Development);
        assert_eq!(ApiMode::Development.toggled(), ApiMode::Production);
        assert_eq!(ApiMode::default(), ApiMode::Production);
    }
}
