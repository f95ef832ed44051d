//! Heuristic lookup tables for availability estimation.
//!
//! The tables are plain data: built once (from the defaults below or a TOML
//! file) and handed to [`super::AvailabilityEstimator`] by reference.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{RoleLevel, SessionCategory};
use crate::error::ConfigError;

/// Base availability for one role level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBaseline {
    pub level: RoleLevel,
    /// Lowercase keywords matched against role title and seniority text.
    /// Keywords of up to three characters must match a whole word.
    pub keywords: Vec<String>,
    pub daily_min_minutes: f64,
    pub daily_max_minutes: f64,
    pub weekly_min_hours: f64,
    pub weekly_max_hours: f64,
    pub session_category: SessionCategory,
}

/// Employer headcount tier and its multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySizeTier {
    pub label: String,
    /// Inclusive upper headcount bound; `None` for the last tier.
    pub max_headcount: Option<u32>,
    pub multiplier: f64,
}

/// Functional-area keyword group and its multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaAdjustment {
    pub label: String,
    pub keywords: Vec<String>,
    pub multiplier: f64,
}

/// All tables used by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityTables {
    /// Checked in order; the first level with a matching keyword wins.
    pub levels: Vec<LevelBaseline>,
    /// Sorted by ascending `max_headcount`.
    pub company_sizes: Vec<CompanySizeTier>,
    /// Checked in order; the first group with a matching keyword wins.
    pub areas: Vec<AreaAdjustment>,
}

impl AvailabilityTables {
    /// Load tables from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let tables: AvailabilityTables = toml::from_str(&content)?;
        tables.check()?;
        Ok(tables)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !self.levels.iter().any(|l| l.level == RoleLevel::Professional) {
            return Err(ConfigError::InvalidValue {
                key: "levels".to_string(),
                message: "a professional baseline is required as the default level".to_string(),
            });
        }
        if self.company_sizes.len() != 5 {
            return Err(ConfigError::InvalidValue {
                key: "company_sizes".to_string(),
                message: format!("expected 5 tiers, found {}", self.company_sizes.len()),
            });
        }
        Ok(())
    }

    pub fn baseline(&self, level: RoleLevel) -> Option<&LevelBaseline> {
        self.levels.iter().find(|l| l.level == level)
    }

    pub fn company_tier(&self, headcount: u32) -> Option<&CompanySizeTier> {
        self.company_sizes
            .iter()
            .find(|t| t.max_headcount.map_or(true, |max| headcount <= max))
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for AvailabilityTables {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelBaseline {
                    level: RoleLevel::Executive,
                    keywords: words(&[
                        "ceo", "cfo", "cto", "coo", "cio", "chief", "president", "founder",
                        "owner", "vp", "vice president", "executive director", "managing partner",
                        "partner",
                    ]),
                    daily_min_minutes: 15.0,
                    daily_max_minutes: 30.0,
                    weekly_min_hours: 1.5,
                    weekly_max_hours: 3.0,
                    session_category: SessionCategory::Short,
                },
                LevelBaseline {
                    level: RoleLevel::Management,
                    keywords: words(&[
                        "director", "manager", "head of", "lead", "supervisor", "coordinator",
                        "superintendent",
                    ]),
                    daily_min_minutes: 20.0,
                    daily_max_minutes: 45.0,
                    weekly_min_hours: 2.0,
                    weekly_max_hours: 4.0,
                    session_category: SessionCategory::Medium,
                },
                LevelBaseline {
                    level: RoleLevel::Senior,
                    keywords: words(&[
                        "senior", "sr", "specialist", "principal", "staff", "expert",
                    ]),
                    daily_min_minutes: 30.0,
                    daily_max_minutes: 55.0,
                    weekly_min_hours: 3.0,
                    weekly_max_hours: 5.0,
                    session_category: SessionCategory::Medium,
                },
                LevelBaseline {
                    level: RoleLevel::Junior,
                    keywords: words(&[
                        "junior", "jr", "intern", "trainee", "apprentice", "assistant",
                        "student", "entry",
                    ]),
                    daily_min_minutes: 45.0,
                    daily_max_minutes: 90.0,
                    weekly_min_hours: 4.0,
                    weekly_max_hours: 8.0,
                    session_category: SessionCategory::Long,
                },
                LevelBaseline {
                    level: RoleLevel::Professional,
                    keywords: words(&[
                        "analyst", "engineer", "developer", "consultant", "associate",
                    ]),
                    daily_min_minutes: 30.0,
                    daily_max_minutes: 60.0,
                    weekly_min_hours: 3.0,
                    weekly_max_hours: 6.0,
                    session_category: SessionCategory::Medium,
                },
            ],
            company_sizes: vec![
                CompanySizeTier {
                    label: "micro".to_string(),
                    max_headcount: Some(10),
                    multiplier: 1.2,
                },
                CompanySizeTier {
                    label: "small".to_string(),
                    max_headcount: Some(50),
                    multiplier: 1.1,
                },
                CompanySizeTier {
                    label: "medium".to_string(),
                    max_headcount: Some(250),
                    multiplier: 1.0,
                },
                CompanySizeTier {
                    label: "large".to_string(),
                    max_headcount: Some(1000),
                    multiplier: 0.9,
                },
                CompanySizeTier {
                    label: "enterprise".to_string(),
                    max_headcount: None,
                    multiplier: 0.85,
                },
            ],
            areas: vec![
                AreaAdjustment {
                    label: "sales".to_string(),
                    keywords: words(&[
                        "sales", "commercial", "business development", "retail",
                        "key account",
                    ]),
                    multiplier: 0.85,
                },
                AreaAdjustment {
                    label: "technology".to_string(),
                    keywords: words(&[
                        "tech", "software", "engineering", "data", "it", "development",
                        "systems", "digital",
                    ]),
                    multiplier: 1.15,
                },
                AreaAdjustment {
                    label: "education".to_string(),
                    keywords: words(&["education", "training", "research", "academic", "learning"]),
                    multiplier: 1.1,
                },
                AreaAdjustment {
                    label: "operations".to_string(),
                    keywords: words(&["operations", "logistics", "production", "manufacturing"]),
                    multiplier: 0.95,
                },
                AreaAdjustment {
                    label: "healthcare".to_string(),
                    keywords: words(&["health", "medical", "clinical", "nursing"]),
                    multiplier: 0.9,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_pass_checks() {
        AvailabilityTables::default().check().unwrap();
    }

    #[test]
    fn company_tiers_by_headcount() {
        let tables = AvailabilityTables::default();
        assert_eq!(tables.company_tier(1).unwrap().label, "micro");
        assert_eq!(tables.company_tier(10).unwrap().label, "micro");
        assert_eq!(tables.company_tier(11).unwrap().label, "small");
        assert_eq!(tables.company_tier(250).unwrap().label, "medium");
        assert_eq!(tables.company_tier(999).unwrap().label, "large");
        assert_eq!(tables.company_tier(50_000).unwrap().label, "enterprise");
    }

    #[test]
    fn tables_roundtrip_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");
        let tables = AvailabilityTables::default();
        std::fs::write(&path, toml::to_string_pretty(&tables).unwrap()).unwrap();

        let loaded = AvailabilityTables::load_from(&path).unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn tables_without_professional_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");
        let mut tables = AvailabilityTables::default();
        tables.levels.retain(|l| l.level != RoleLevel::Professional);
        std::fs::write(&path, toml::to_string_pretty(&tables).unwrap()).unwrap();

        let err = AvailabilityTables::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
