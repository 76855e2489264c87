// Service configuration read from the environment.
//
// Responsibilities
// - Parse and default every setting once at start-up.
// - Pick the one backend of this deployment. A remote document without credentials degrades
//   to the in-memory backend.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::modules::events::store::snapshot_cache::DEFAULT_CACHE_KEY;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_JSONBIN_BASE_URL: &str = "https://api.jsonbin.io/v3/b";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    JsonBin,
    Local,
}

impl FromStr for BackendKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "jsonbin" => Ok(BackendKind::JsonBin),
            "local" => Ok(BackendKind::Local),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBinConfig {
    pub base_url: String,
    pub bin_id: String,
    pub api_key: String,
}

impl JsonBinConfig {
    /// Address of the document, e.g. `https://api.jsonbin.io/v3/b/<bin>`.
    pub fn resource(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.bin_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Memory,
    JsonBin(JsonBinConfig),
    Local { data_dir: PathBuf, key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend: BackendConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_addr = var("NGO_CALENDAR_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "NGO_CALENDAR_ADDR",
            value: raw_addr.clone(),
        })?;

        let jsonbin = match (var("JSONBIN_BIN_ID"), var("JSONBIN_API_KEY")) {
            (Some(bin_id), Some(api_key)) => Some(JsonBinConfig {
                base_url: var("JSONBIN_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_JSONBIN_BASE_URL.to_string()),
                bin_id,
                api_key,
            }),
            _ => None,
        };

        let kind = match var("NGO_CALENDAR_BACKEND") {
            Some(raw) => raw.parse::<BackendKind>().map_err(|_| ConfigError::Invalid {
                name: "NGO_CALENDAR_BACKEND",
                value: raw.clone(),
            })?,
            None if jsonbin.is_some() => BackendKind::JsonBin,
            None => BackendKind::Memory,
        };

        let backend = match (kind, jsonbin) {
            (BackendKind::Memory, _) => BackendConfig::Memory,
            (BackendKind::JsonBin, Some(jsonbin)) => BackendConfig::JsonBin(jsonbin),
            (BackendKind::JsonBin, None) => {
                tracing::warn!(
                    "JSONBIN_BIN_ID or JSONBIN_API_KEY missing, falling back to the in-memory backend"
                );
                BackendConfig::Memory
            }
            (BackendKind::Local, _) => BackendConfig::Local {
                data_dir: PathBuf::from(
                    var("NGO_CALENDAR_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
                ),
                key: var("NGO_CALENDAR_STORAGE_KEY")
                    .unwrap_or_else(|| DEFAULT_CACHE_KEY.to_string()),
            },
        };

        Ok(Self { addr, backend })
    }
}
