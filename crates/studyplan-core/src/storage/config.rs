//! TOML-based engine configuration.
//!
//! Holds the tunables the planning engine reads:
//! - Lesson interaction overhead
//! - Learning route heuristics
//! - Advisory validation thresholds
//! - Generation safety bounds and defaults
//! - Pomodoro segmentation
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::availability::AvailabilityTables;
use crate::error::ConfigError;
use crate::route::RouteSettings;
use crate::study_mode::PomodoroBreakdown;
use crate::validation::{ScheduleThresholds, TimingThresholds};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonsConfig {
    #[serde(default = "default_overhead")]
    pub interaction_overhead_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_weekly_hours")]
    pub weekly_study_hours: f64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_max_courses")]
    pub max_courses_before_warning: usize,
    #[serde(default = "default_prerequisite_progress")]
    pub prerequisite_progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_short_session")]
    pub short_session_minutes: u32,
    #[serde(default = "default_long_session")]
    pub long_session_minutes: u32,
    #[serde(default = "default_min_days")]
    pub min_days_per_week: usize,
    #[serde(default = "default_min_weekly")]
    pub min_weekly_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Calendar days walked per selected weekday before giving up.
    #[serde(default = "default_iterations")]
    pub iterations_per_selected_day: u32,
    /// Daily cap used when a request does not set its own.
    #[serde(default = "default_max_hours")]
    pub default_max_consecutive_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_focus")]
    pub focus_minutes: u32,
    #[serde(default = "default_break")]
    pub break_minutes: u32,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub lessons: LessonsConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
    /// TOML file replacing the built-in availability tables.
    #[serde(default)]
    pub availability_tables: Option<PathBuf>,
}

fn default_overhead() -> u32 {
    3
}
fn default_weekly_hours() -> f64 {
    3.5
}
fn default_max_suggestions() -> usize {
    3
}
fn default_max_courses() -> usize {
    5
}
fn default_prerequisite_progress() -> f64 {
    50.0
}
fn default_short_session() -> u32 {
    15
}
fn default_long_session() -> u32 {
    180
}
fn default_min_days() -> usize {
    3
}
fn default_min_weekly() -> u32 {
    60
}
fn default_iterations() -> u32 {
    365
}
fn default_max_hours() -> f64 {
    3.0
}
fn default_focus() -> u32 {
    25
}
fn default_break() -> u32 {
    5
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self {
            interaction_overhead_minutes: default_overhead(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            weekly_study_hours: default_weekly_hours(),
            max_suggestions: default_max_suggestions(),
            max_courses_before_warning: default_max_courses(),
            prerequisite_progress_percent: default_prerequisite_progress(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            short_session_minutes: default_short_session(),
            long_session_minutes: default_long_session(),
            min_days_per_week: default_min_days(),
            min_weekly_minutes: default_min_weekly(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            iterations_per_selected_day: default_iterations(),
            default_max_consecutive_hours: default_max_hours(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus(),
            break_minutes: default_break(),
        }
    }
}

impl EngineConfig {
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
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
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

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Change a value by dot-separated key without saving.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    /// Availability tables: the configured file, or the built-in defaults.
    pub fn availability_tables(&self) -> Result<AvailabilityTables, ConfigError> {
        match &self.availability_tables {
            Some(path) => AvailabilityTables::load_from(path),
            None => Ok(AvailabilityTables::default()),
        }
    }

    pub fn route_settings(&self) -> RouteSettings {
        RouteSettings {
            weekly_study_hours: self.route.weekly_study_hours,
            max_suggestions: self.route.max_suggestions,
            max_courses_before_warning: self.route.max_courses_before_warning,
            prerequisite_progress_percent: self.route.prerequisite_progress_percent,
        }
    }

    pub fn timing_thresholds(&self) -> TimingThresholds {
        TimingThresholds {
            short_session_minutes: self.validation.short_session_minutes,
            long_session_minutes: self.validation.long_session_minutes,
        }
    }

    pub fn schedule_thresholds(&self) -> ScheduleThresholds {
        ScheduleThresholds {
            min_days_per_week: self.validation.min_days_per_week,
            min_weekly_minutes: self.validation.min_weekly_minutes,
        }
    }

    pub fn pomodoro_breakdown(&self) -> PomodoroBreakdown {
        PomodoroBreakdown {
            focus_minutes: self.pomodoro.focus_minutes,
            break_minutes: self.pomodoro.break_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.availability_tables, None);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let parsed: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.lessons.interaction_overhead_minutes, 3);
        assert_eq!(parsed.route.weekly_study_hours, 3.5);
        assert_eq!(parsed.generation.iterations_per_selected_day, 365);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.get("pomodoro.focus_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("route.weekly_study_hours").as_deref(), Some("3.5"));
        assert!(cfg.get("route.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn update_changes_integer_and_float_fields() {
        let mut cfg = EngineConfig::default();
        cfg.update("validation.min_days_per_week", "4").unwrap();
        cfg.update("route.weekly_study_hours", "5.25").unwrap();
        cfg.update("generation.default_max_consecutive_hours", "2").unwrap();
        assert_eq!(cfg.validation.min_days_per_week, 4);
        assert_eq!(cfg.route.weekly_study_hours, 5.25);
        assert_eq!(cfg.generation.default_max_consecutive_hours, 2.0);
    }

    #[test]
    fn update_sets_optional_path() {
        let mut cfg = EngineConfig::default();
        cfg.update("availability_tables", "/tmp/tables.toml").unwrap();
        assert_eq!(cfg.availability_tables, Some(PathBuf::from("/tmp/tables.toml")));
    }

    #[test]
    fn update_rejects_unknown_key() {
        let mut cfg = EngineConfig::default();
        let err = cfg.update("route.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn update_rejects_invalid_number() {
        let mut cfg = EngineConfig::default();
        let err = cfg.update("pomodoro.focus_minutes", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.pomodoro.focus_minutes, 25);
    }

    #[test]
    fn update_rejects_negative_for_unsigned() {
        let mut cfg = EngineConfig::default();
        assert!(cfg.update("lessons.interaction_overhead_minutes", "-2").is_err());
    }

    #[test]
    fn derived_settings_follow_config() {
        let mut cfg = EngineConfig::default();
        cfg.route.max_suggestions = 1;
        cfg.pomodoro.focus_minutes = 50;
        assert_eq!(cfg.route_settings().max_suggestions, 1);
        assert_eq!(cfg.pomodoro_breakdown().focus_minutes, 50);
        assert_eq!(cfg.timing_thresholds(), TimingThresholds::default());
        assert_eq!(cfg.schedule_thresholds(), ScheduleThresholds::default());
    }
}
