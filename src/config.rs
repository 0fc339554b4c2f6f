//! Layered runtime settings.
//!
//! Defaults first, then an optional config file, then
//! `CLONEWATCH_`-prefixed environment variables. CLI flags override the
//! merged result in `main`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database holding the pipeline collections.
    pub database: String,
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Seconds between background sampling ticks.
    pub interval_secs: u64,
    /// Optional JSON totals file to sample instead of MongoDB.
    #[serde(default)]
    pub totals_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings, overlaying an optional config file and the
    /// environment on the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("mongo_uri", "mongodb://dbstorage:27017")?
            .set_default("database", "cloneDetector")?
            .set_default("listen_addr", "0.0.0.0:5000")?
            .set_default("interval_secs", 60_i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("CLONEWATCH"))
            .build()?
            .try_deserialize()
    }

    /// The sampling interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
