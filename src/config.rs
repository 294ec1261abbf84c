use std::env;

use anyhow::{Context, Result};

/// Default SQLite file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./environmental_tracker.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so any of
/// these can live there instead of the real environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database (ECOTRACK_DB_PATH)
    pub db_path: String,
    /// Address the web server binds to (HOST)
    pub host: String,
    /// Port the web server listens on (PORT)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only a malformed PORT is an error.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number between 0 and 65535, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            db_path: lookup("ECOTRACK_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}
