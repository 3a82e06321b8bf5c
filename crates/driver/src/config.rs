//! Driver configuration (environment-based)
//!
//! # Environment Variables
//!
//! - `DECOMP_LOG_FORMAT`: `pretty` (default) or `json`
//! - `DECOMP_MANIFEST`: comma-separated list of job manifest paths (required)
//! - `DECOMP_WARN_ON_FALLBACK`: `true` (default) / `false`, log unrecognised
//!   toolchains at WARN
//! - `RUST_LOG`: tracing filter (default: `decomp=info`)

use decomp_core::application::RegistryConfig;
use decomp_core::{AppError, Result};
use std::path::PathBuf;

pub const ENV_LOG_FORMAT: &str = "DECOMP_LOG_FORMAT";
pub const ENV_MANIFEST: &str = "DECOMP_MANIFEST";
pub const ENV_WARN_ON_FALLBACK: &str = "DECOMP_WARN_ON_FALLBACK";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "decomp=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub log_format: LogFormat,
    pub manifests: Vec<PathBuf>,
    pub warn_on_fallback: bool,
}

impl DriverConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` (injectable for tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup(ENV_LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{ENV_LOG_FORMAT} must be 'pretty' or 'json', got '{other}'"
                )))
            }
        };

        let manifests: Vec<PathBuf> = lookup(ENV_MANIFEST)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if manifests.is_empty() {
            return Err(AppError::Config(format!(
                "{ENV_MANIFEST} must name at least one manifest file"
            )));
        }

        let warn_on_fallback = match lookup(ENV_WARN_ON_FALLBACK) {
            None => true,
            Some(value) => parse_bool(&value).ok_or_else(|| {
                AppError::Config(format!(
                    "{ENV_WARN_ON_FALLBACK} must be a boolean, got '{value}'"
                ))
            })?,
        };

        Ok(Self {
            log_format,
            manifests,
            warn_on_fallback,
        })
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            warn_on_fallback: self.warn_on_fallback,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
