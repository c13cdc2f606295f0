use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which content store backs the pitch repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Sanity content lake over HTTP
    Sanity,
    /// Process-local store, for development
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sanity" => Ok(StoreBackend::Sanity),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Sanity project settings
#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Write token; reads of public datasets work without it
    pub token: Option<String>,
    pub use_cdn: bool,
    /// Overrides `https://{project_id}.api.sanity.io`
    pub api_host: Option<String>,
}

/// Per-IP limit on submission routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Present when `store_backend` is `Sanity`
    pub sanity: Option<SanityConfig>,
    pub submit_rate_limit: Option<RateLimit>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let store_backend = parse_or(&lookup, "STORE_BACKEND", StoreBackend::Sanity)?;

        let sanity = match store_backend {
            StoreBackend::Sanity => Some(SanityConfig {
                project_id: lookup("SANITY_PROJECT_ID")
                    .filter(|v| !v.is_empty())
                    .ok_or(ConfigError::Missing("SANITY_PROJECT_ID"))?,
                dataset: lookup("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
                api_version: lookup("SANITY_API_VERSION")
                    .unwrap_or_else(|| "2024-10-14".to_string()),
                token: lookup("SANITY_API_TOKEN").filter(|v| !v.is_empty()),
                use_cdn: parse_or(&lookup, "SANITY_USE_CDN", true)?,
                api_host: lookup("SANITY_API_HOST").filter(|v| !v.is_empty()),
            }),
            StoreBackend::Memory => None,
        };

        let per_second: u64 = parse_or(&lookup, "SUBMIT_RATE_PER_SECOND", 2)?;
        let burst: u32 = parse_or(&lookup, "SUBMIT_RATE_BURST", 5)?;
        let submit_rate_limit = (per_second > 0 && burst > 0).then_some(RateLimit { per_second, burst });

        Ok(Self {
            port,
            store_backend,
            sanity,
            submit_rate_limit,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        _ => Ok(default),
    }
}
