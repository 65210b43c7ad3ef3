//! TOML-based application configuration.
//!
//! Stores:
//! - Weekly review weights, limit and open-loop look-ahead window
//! - Defaults applied when adding people
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::people::DEFAULT_IMPORTANCE;
use crate::review::{PriorityWeights, DEFAULT_REVIEW_LIMIT};

/// Upper bound for `review.open_loop_window_days` (about a century).
pub const MAX_OPEN_LOOP_WINDOW_DAYS: u32 = 36_500;

/// Weekly review configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Open commitments due within this many days (or undated) count as open loops.
    #[serde(default = "default_open_loop_window_days")]
    pub open_loop_window_days: u32,
    #[serde(default = "default_importance_weight")]
    pub importance_weight: i64,
    #[serde(default = "default_open_loop_weight")]
    pub open_loop_weight: i64,
    #[serde(default = "default_recency_cap_days")]
    pub recency_cap_days: i64,
}

/// Defaults for new people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleConfig {
    #[serde(default = "default_importance")]
    pub default_importance: i64,
    /// Offered as the cadence when none is given. Zero disables it.
    #[serde(default = "default_suggested_frequency_days")]
    pub suggested_frequency_days: u32,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub people: PeopleConfig,
}

fn default_limit() -> usize {
    DEFAULT_REVIEW_LIMIT
}
fn default_open_loop_window_days() -> u32 {
    7
}
fn default_importance_weight() -> i64 {
    PriorityWeights::default().importance
}
fn default_open_loop_weight() -> i64 {
    PriorityWeights::default().open_loop
}
fn default_recency_cap_days() -> i64 {
    PriorityWeights::default().recency_cap_days
}
fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}
fn default_suggested_frequency_days() -> u32 {
    14
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            open_loop_window_days: default_open_loop_window_days(),
            importance_weight: default_importance_weight(),
            open_loop_weight: default_open_loop_weight(),
            recency_cap_days: default_recency_cap_days(),
        }
    }
}

impl ReviewConfig {
    pub fn weights(&self) -> PriorityWeights {
        PriorityWeights {
            importance: self.importance_weight,
            open_loop: self.open_loop_weight,
            recency_cap_days: self.recency_cap_days,
        }
    }
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            default_importance: default_importance(),
            suggested_frequency_days: default_suggested_frequency_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as integer")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults there when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.review.recency_cap_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "review.recency_cap_days".into(),
                message: "must not be negative".into(),
            });
        }
        if self.review.open_loop_window_days > MAX_OPEN_LOOP_WINDOW_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "review.open_loop_window_days".into(),
                message: format!("must be at most {MAX_OPEN_LOOP_WINDOW_DAYS}"),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("falling back to default config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[review]\nlimit = 3\n").unwrap();
        assert_eq!(parsed.review.limit, 3);
        assert_eq!(parsed.review.open_loop_window_days, 7);
        assert_eq!(parsed.people.default_importance, 3);
    }

    #[test]
    fn default_weights_match_ranker() {
        assert_eq!(Config::default().review.weights(), PriorityWeights::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("review.limit").as_deref(), Some("5"));
        assert_eq!(cfg.get("people.suggested_frequency_days").as_deref(), Some("14"));
        assert!(cfg.get("review.missing_key").is_none());
        assert!(cfg.get("review").is_none());
    }

    #[test]
    fn set_updates_numbers() {
        let mut cfg = Config::default();
        cfg.set("review.open_loop_weight", "20").unwrap();
        cfg.set("review.importance_weight", "-1").unwrap();
        assert_eq!(cfg.review.open_loop_weight, 20);
        assert_eq!(cfg.review.importance_weight, -1);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("review.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("review", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("review.limit", "many").is_err());
        assert!(cfg.set("review.limit", "-2").is_err());
        assert!(cfg.set("review.recency_cap_days", "-1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_bounds_open_loop_window() {
        let mut cfg = Config::default();
        cfg.set("review.open_loop_window_days", "36500").unwrap();
        assert_eq!(cfg.review.open_loop_window_days, MAX_OPEN_LOOP_WINDOW_DAYS);
        let err = cfg
            .set("review.open_loop_window_days", "3000000")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.review.open_loop_window_days, MAX_OPEN_LOOP_WINDOW_DAYS);
    }

    #[test]
    fn save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("review.limit", "8").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().review.limit, 8);
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "review = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
