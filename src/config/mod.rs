// src/config/mod.rs
// All tunables load from the environment (.env supported). The API key is
// the only required value; everything else has a sensible default.
//
// No process-global config: the struct is built once at startup and passed
// explicitly into whatever needs it.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{CoachError, Result};

/// Default location of the profile document.
pub const DEFAULT_DATA_PATH: &str = "data/user_data.json";

#[derive(Debug, Clone)]
pub struct CoachConfig {
    // ── Gemini Configuration
    pub api_key: String,
    pub model: String,
    pub request_timeout: u64,

    // ── Profile Store Configuration
    pub data_path: PathBuf,

    // ── Logging Configuration
    pub debug_logging: bool,
}

/// Parses an env value, tolerating inline comments and stray whitespace.
fn parse_clean<T: FromStr>(raw: &str, default: T) -> T {
    let clean = raw.split('#').next().unwrap_or("").trim();
    clean.parse::<T>().unwrap_or(default)
}

fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(val) => parse_clean(&val, default),
        Err(_) => default,
    }
}

/// Resolves the profile document path from the environment alone. Store-only
/// commands use this so a missing API key never blocks local operations.
pub fn data_path_from_env() -> PathBuf {
    PathBuf::from(env_var_or("COACH_DATA_PATH", DEFAULT_DATA_PATH.to_string()))
}

impl CoachConfig {
    /// Loads configuration from the environment, reading a `.env` file first
    /// if one exists. Fails when `GEMINI_API_KEY` is missing or empty; the
    /// failure happens here, before any generation call is attempted.
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine; plain environment variables still apply.
        let _ = dotenvy::dotenv();

        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                CoachError::Configuration(
                    "GEMINI_API_KEY is not set. Add it to your environment or a .env file.".into(),
                )
            })?;

        Ok(Self {
            api_key,
            model: env_var_or("GEMINI_MODEL", "gemini-2.0-flash".to_string()),
            request_timeout: env_var_or("COACH_REQUEST_TIMEOUT", 60),
            data_path: data_path_from_env(),
            debug_logging: env_var_or("COACH_DEBUG_LOGGING", false),
        })
    }
}
