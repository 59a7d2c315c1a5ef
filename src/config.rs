use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "KOBO_BASE_URL";
pub const ASSET_UID_VAR: &str = "KOBO_ASSET_UID";
pub const TOKEN_VAR: &str = "KOBO_TOKEN";
pub const OUTPUT_VAR: &str = "KOBO_OUTPUT";
pub const TIMEOUT_VAR: &str = "KOBO_TIMEOUT_SECS";

const DEFAULT_OUTPUT: &str = "data.json";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing env var: {0}")]
    Missing(&'static str),
    #[error("Invalid value for env var {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Without trailing `/`.
    pub base_url: String,
    pub asset_uid: String,
    pub token: String,
    pub output: PathBuf,
    pub timeout: Duration,
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("asset_uid", &self.asset_uid)
            .field("token", &"***")
            .field("output", &self.output)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset and empty
    /// variables are treated the same.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let base_url = require(BASE_URL_VAR)?.trim_end_matches('/').to_owned();
        let asset_uid = require(ASSET_UID_VAR)?;
        let token = require(TOKEN_VAR)?;

        let output = get(OUTPUT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            asset_uid,
            token,
            output,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
