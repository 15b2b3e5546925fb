//! Store configuration: in-code defaults plus an optional layered loader (TOML file, then
//! environment variables) built on the `config` crate.

use std::path::Path;
use std::sync::Arc;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::capacity::DEFAULT_GROWTH_CHUNK;
use crate::error::StoreError;
use crate::interpolation::InterpolationMode;
use crate::telemetry::{noop_event_listener, StoreEventListener};

/// What `add` does with a sample whose timestamp is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Insert the new sample immediately before the existing equal-time samples. Point lookups
    /// keep resolving to the last sample of the run.
    #[default]
    KeepBoth,
    /// Overwrite the stored sample that point lookups resolve to at that timestamp.
    Replace,
}

/// Configuration options for a `TimeSeriesStore`.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of samples the buffer grows by when full. Must be positive.
    pub growth_chunk: usize,
    /// Expected number of samples; rounded up to a multiple of `growth_chunk`.
    pub initial_capacity: usize,
    /// Interpolation policy, fixed for the lifetime of the store.
    pub interpolation: InterpolationMode,
    /// Handling of samples with an already-stored timestamp.
    pub duplicate_policy: DuplicatePolicy,
    /// Structured event hook for observability (no-op by default).
    pub event_listener: Arc<dyn StoreEventListener>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            growth_chunk: DEFAULT_GROWTH_CHUNK,
            initial_capacity: 0,
            interpolation: InterpolationMode::Linear,
            duplicate_policy: DuplicatePolicy::KeepBoth,
            event_listener: noop_event_listener(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.growth_chunk == 0 {
            return Err(StoreError::ConfigError(
                "growth_chunk must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Only overwrites fields that are `Some` in `partial`.
    pub fn merge(&mut self, partial: &StoreFileConfig) {
        if let Some(n) = partial.growth_chunk {
            self.growth_chunk = n;
        }
        if let Some(n) = partial.initial_capacity {
            self.initial_capacity = n;
        }
        if let Some(mode) = partial.interpolation {
            self.interpolation = mode;
        }
        if let Some(policy) = partial.duplicate_policy {
            self.duplicate_policy = policy;
        }
    }
}

/// Store settings as read from a file or the environment. Every field optional for layering.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StoreFileConfig {
    pub growth_chunk: Option<usize>,
    pub initial_capacity: Option<usize>,
    pub interpolation: Option<InterpolationMode>,
    pub duplicate_policy: Option<DuplicatePolicy>,
}

/// Loads a `StoreConfig` from defaults, an optional TOML file and optional environment variables,
/// in that order of precedence (later sources win).
///
/// With `env_prefix = Some("SENSORS")`, `SENSORS_GROWTH_CHUNK=1024` overrides `growth_chunk`.
pub fn load_store_config(
    path: Option<&Path>,
    env_prefix: Option<&str>,
) -> Result<StoreConfig, StoreError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(StoreError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path).format(FileFormat::Toml));
    }

    if let Some(prefix) = env_prefix {
        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .try_parsing(true)
                .ignore_empty(true),
        );
    }

    let partial: StoreFileConfig = builder.build()?.try_deserialize()?;
    finish(partial)
}

/// Parses a `StoreConfig` from TOML text layered over the defaults.
pub fn parse_store_config(toml: &str) -> Result<StoreConfig, StoreError> {
    let partial: StoreFileConfig = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    finish(partial)
}

fn finish(partial: StoreFileConfig) -> Result<StoreConfig, StoreError> {
    let mut config = StoreConfig::default();
    config.merge(&partial);
    config.validate()?;
    Ok(config)
}
