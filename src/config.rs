use crate::constants::*;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Resolved configuration with all values filled in (no Options).
///
/// Built once at startup and never mutated afterwards. All fields have
/// concrete values, making it safe to access directly without unwrapping.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL prefix for every endpoint, without a trailing slash
    pub api_url: String,
    /// Value sent as `X-Access-Key` on every request
    pub access_key: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Pause after each fetch/save cycle
    pub request_delay: Duration,
    /// Base directory for all output files
    pub output_dir: PathBuf,
}

/// Optional, non-secret settings that can be loaded from a TOML file.
///
/// The API URL and access key are deliberately absent: they only ever come
/// from the environment. Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Base directory for output files
    pub output_dir: Option<PathBuf>,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: Option<f64>,
    /// Pause between requests in seconds
    pub request_delay_seconds: Option<f64>,
}

impl ConfigFile {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read, the TOML is
    /// malformed, or unknown keys are present.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::InvalidConfig(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        let file: ConfigFile = toml::from_str(&contents)?;
        debug!(config_file = %path.display(), "Config file loaded");
        Ok(file)
    }
}

/// Loads the first `.env` file that exists among `candidates`.
///
/// Variables already set in the process environment are kept. Returns the
/// path that was loaded, if any.
pub fn load_env_files<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(path) {
            Ok(()) => {
                info!(env_file = %path.display(), "Loaded environment file");
                return Some(path.to_path_buf());
            }
            Err(e) => {
                debug!(env_file = %path.display(), error = %e, "Could not load environment file");
            }
        }
    }
    None
}

impl Config {
    /// Resolves the configuration from the process environment.
    ///
    /// See [`Config::from_lookup`] for the rules applied.
    pub fn from_env(file: &ConfigFile) -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok(), file)
    }

    /// Resolves the configuration from an arbitrary variable lookup.
    ///
    /// Environment values take precedence over the config file, which takes
    /// precedence over the built-in defaults. The output directory is never
    /// read from the environment; the CLI overrides it afterwards.
    ///
    /// # Errors
    ///
    /// - `MissingEnv` if `API_URL` or `ACCESS_KEY` is unset or empty
    /// - `InvalidConfig` if a numeric value does not parse or the timeout is
    ///   not positive
    ///
    /// An `API_URL` that is not an absolute URL only logs a warning; the
    /// requests built from it fail individually.
    pub fn from_lookup<F>(lookup: F, file: &ConfigFile) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = required(&lookup, API_URL_VAR)?;
        let access_key = required(&lookup, ACCESS_KEY_VAR)?;

        if let Err(e) = Url::parse(&api_url) {
            // not fatal: every request will fail and be reported on its own
            warn!(api_url = %api_url, error = %e, "API_URL does not look like an absolute URL");
        }
        let api_url = api_url.trim_end_matches('/').to_string();

        let timeout_secs = seconds(
            &lookup,
            REQUEST_TIMEOUT_VAR,
            file.request_timeout_seconds,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs <= 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "{REQUEST_TIMEOUT_VAR} must be greater than 0, got {timeout_secs}"
            )));
        }

        let delay_secs = seconds(
            &lookup,
            REQUEST_DELAY_VAR,
            file.request_delay_seconds,
            DEFAULT_REQUEST_DELAY_SECS,
        )?;

        Ok(Self {
            api_url,
            access_key,
            request_timeout: to_duration(REQUEST_TIMEOUT_VAR, timeout_secs)?,
            // a negative delay means no pause at all
            request_delay: to_duration(REQUEST_DELAY_VAR, delay_secs.max(0.0))?,
            output_dir: file
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::MissingEnv(name.to_string())),
    }
}

fn seconds<F>(lookup: &F, name: &str, from_file: Option<f64>, default: f64) -> AppResult<f64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
            AppError::InvalidConfig(format!("{name} must be a number of seconds, got '{raw}': {e}"))
        }),
        None => Ok(from_file.unwrap_or(default)),
    }
}

fn to_duration(name: &str, secs: f64) -> AppResult<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| AppError::InvalidConfig(format!("{name} is out of range ({secs}): {e}")))
}
