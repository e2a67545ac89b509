//! Process configuration: the bot token and the application id.
//!
//! Values come from the environment (after `.env` has been loaded) and fall back
//! to a JSON file shaped like `{"token": "...", "clientId": "..."}`.

use serde::{Deserialize, Deserializer};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const APPLICATION_ID_VAR: &str = "DISCORD_APPLICATION_ID";
const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid application id: {0}")]
    InvalidApplicationId(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub token: String,
    #[serde(rename = "clientId", deserialize_with = "application_id_from_json")]
    pub application_id: u64,
}

impl Config {
    /// Load from the environment, falling back to the JSON config file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::from_vars(|key| env::var(key).ok()) {
            Ok(config) => Ok(config),
            Err(ConfigError::Missing(key)) => {
                let path = env::var(CONFIG_PATH_VAR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

                if !path.exists() {
                    return Err(ConfigError::Missing(key));
                }

                tracing::info!("{} not set, reading {}", key, path.display());
                Self::from_file(&path)
            }
            Err(err) => Err(err),
        }
    }

    /// Build the configuration from a variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let application_id =
            lookup(APPLICATION_ID_VAR).ok_or(ConfigError::Missing(APPLICATION_ID_VAR))?;

        Ok(Self {
            token,
            application_id: parse_application_id(&application_id)?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_application_id(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| ConfigError::InvalidApplicationId(raw.to_string()))
}

/// Snowflakes are usually written as strings, but plain numbers are accepted too.
fn application_id_from_json<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Text(String),
        Number(u64),
    }

    match Snowflake::deserialize(deserializer)? {
        Snowflake::Text(text) => parse_application_id(&text).map_err(serde::de::Error::custom),
        Snowflake::Number(0) => Err(serde::de::Error::custom("application id cannot be 0")),
        Snowflake::Number(id) => Ok(id),
    }
}
