//! Operator settings, read from `config.yml` at startup and on explicit reload.
//!
//! Keys are kebab-case and every key is optional:
//!
//! ```yaml
//! cooldown-seconds: 3
//! explosion-power: 4.0
//! set-fire: true
//! break-blocks: false
//! max-flight-ticks: 80
//! sweep-interval-secs: 60
//! ```
//!
//! Each key is read on its own: a missing, mistyped or out-of-range value falls back to
//! that key's default with a warning and leaves the other keys alone. Only a file that
//! cannot be read or is not a YAML mapping at all is rejected, and even then the caller of
//! `load_or_default` gets the built-in defaults and one warning in the log.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("settings must be a mapping of keys, found {0}")]
    NotAMapping(&'static str),
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FireballSettings {
    /// Zero disables the cooldown.
    pub cooldown_seconds: f64,
    pub explosion_power: f32,
    pub set_fire: bool,
    pub break_blocks: bool,
    /// Zero means unbounded flight.
    pub max_flight_ticks: u32,
    pub sweep_interval_secs: f64,
}

impl Default for FireballSettings {
    fn default() -> Self {
        Self {
            cooldown_seconds: Self::DEFAULT_COOLDOWN_SECONDS,
            explosion_power: Self::DEFAULT_EXPLOSION_POWER,
            set_fire: true,
            break_blocks: false,
            max_flight_ticks: 80,
            sweep_interval_secs: Self::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl FireballSettings {
    pub const DEFAULT_COOLDOWN_SECONDS: f64 = 3.0;
    pub const DEFAULT_EXPLOSION_POWER: f32 = 4.0;
    pub const DEFAULT_SWEEP_INTERVAL_SECS: f64 = 60.0;

    pub fn from_yaml_str(src: &str) -> Result<Self, SettingsError> {
        if src.trim().is_empty() {
            return Ok(Self::default());
        }
        let keys = match serde_yaml::from_str::<Value>(src)? {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(keys) => keys,
            Value::Sequence(_) => return Err(SettingsError::NotAMapping("a sequence")),
            Value::Tagged(_) => return Err(SettingsError::NotAMapping("a tagged value")),
            _ => return Err(SettingsError::NotAMapping("a scalar")),
        };

        let d = Self::default();
        let parsed = Self {
            cooldown_seconds: read_key(&keys, "cooldown-seconds", d.cooldown_seconds),
            explosion_power: read_key(&keys, "explosion-power", d.explosion_power),
            set_fire: read_key(&keys, "set-fire", d.set_fire),
            break_blocks: read_key(&keys, "break-blocks", d.break_blocks),
            max_flight_ticks: read_key(&keys, "max-flight-ticks", d.max_flight_ticks),
            sweep_interval_secs: read_key(&keys, "sweep-interval-secs", d.sweep_interval_secs),
        };
        Ok(parsed.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&src)
    }

    /// Load from `path`, falling back to defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{err}; using built-in fireball settings");
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults, one field at a time.
    pub fn sanitized(mut self) -> Self {
        if !(self.explosion_power.is_finite() && self.explosion_power > 0.0) {
            warn!(
                explosion_power = self.explosion_power,
                "explosion-power must be a positive number; using {}",
                Self::DEFAULT_EXPLOSION_POWER
            );
            self.explosion_power = Self::DEFAULT_EXPLOSION_POWER;
        }
        if self.cooldown_seconds.is_nan() {
            warn!("cooldown-seconds is NaN; using {}", Self::DEFAULT_COOLDOWN_SECONDS);
            self.cooldown_seconds = Self::DEFAULT_COOLDOWN_SECONDS;
        } else if self.cooldown_seconds < 0.0 {
            self.cooldown_seconds = 0.0;
        }
        if !(self.sweep_interval_secs.is_finite() && self.sweep_interval_secs > 0.0) {
            self.sweep_interval_secs = Self::DEFAULT_SWEEP_INTERVAL_SECS;
        }
        self
    }

    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_seconds).unwrap_or(Duration::MAX)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.sweep_interval_secs)
            .unwrap_or(Duration::from_secs_f64(Self::DEFAULT_SWEEP_INTERVAL_SECS))
    }
}

/// `key` from `keys` as a `T`, or `default` (with a warning) when it is absent or unusable.
fn read_key<T: DeserializeOwned + Debug>(keys: &Mapping, key: &str, default: T) -> T {
    let Some(raw) = keys.get(key) else {
        return default;
    };
    match serde_yaml::from_value(raw.clone()) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, "{err}; using {default:?}");
            default
        }
    }
}
