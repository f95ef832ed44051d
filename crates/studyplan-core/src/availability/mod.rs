//! Study-time availability estimation from professional-profile signals.
//!
//! A profile is classified into a role level, the level's baseline budget is
//! looked up, and two independent multipliers (employer size, functional
//! area) scale it. The result is computed fresh for every profile.

mod tables;

pub use tables::{AreaAdjustment, AvailabilityTables, CompanySizeTier, LevelBaseline};

use serde::{Deserialize, Serialize};

/// Role level, from least to most available study time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleLevel {
    Executive,
    Management,
    Senior,
    Professional,
    Junior,
}

impl RoleLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoleLevel::Executive => "executive",
            RoleLevel::Management => "management",
            RoleLevel::Senior => "senior",
            RoleLevel::Professional => "professional",
            RoleLevel::Junior => "junior",
        }
    }
}

/// Recommended session length category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionCategory {
    Short,
    Medium,
    Long,
}

impl SessionCategory {
    /// Classify a daily maximum: up to 35 min short, up to 60 medium, else long.
    pub fn from_daily_max(minutes: u32) -> Self {
        if minutes <= 35 {
            SessionCategory::Short
        } else if minutes <= 60 {
            SessionCategory::Medium
        } else {
            SessionCategory::Long
        }
    }
}

/// Profile fields the estimator reads. Missing fields fall back to neutral values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub functional_area: Option<String>,
    #[serde(default)]
    pub company_headcount: Option<u32>,
}

/// Where the role level came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSource {
    RoleTitle,
    SeniorityField,
    Default,
}

/// The multiplier chain behind an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityMultipliers {
    pub company_tier: Option<String>,
    pub company_size: f64,
    pub functional_area_group: Option<String>,
    pub functional_area: f64,
    pub combined: f64,
}

/// Estimated daily and weekly study budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEstimate {
    pub role_level: RoleLevel,
    pub level_source: LevelSource,
    pub daily_min_minutes: u32,
    pub daily_max_minutes: u32,
    pub weekly_min_hours: f64,
    pub weekly_max_hours: f64,
    /// Category after adjustments, from the daily maximum.
    pub session_category: SessionCategory,
    /// Category the level's baseline suggests before adjustments.
    pub baseline_category: SessionCategory,
    pub multipliers: AvailabilityMultipliers,
    pub rationale: String,
}

/// Estimator borrowing immutable lookup tables.
pub struct AvailabilityEstimator<'a> {
    tables: &'a AvailabilityTables,
}

impl<'a> AvailabilityEstimator<'a> {
    pub fn new(tables: &'a AvailabilityTables) -> Self {
        Self { tables }
    }

    /// Classify the role: title text first, then the explicit seniority field.
    pub fn classify(&self, profile: &ProfessionalProfile) -> (RoleLevel, LevelSource) {
        if let Some(level) = profile.role_title.as_deref().and_then(|t| self.match_level(t)) {
            return (level, LevelSource::RoleTitle);
        }
        if let Some(level) = profile.seniority.as_deref().and_then(|s| self.match_level(s)) {
            return (level, LevelSource::SeniorityField);
        }
        (RoleLevel::Professional, LevelSource::Default)
    }

    fn match_level(&self, text: &str) -> Option<RoleLevel> {
        self.tables
            .levels
            .iter()
            .find(|baseline| matches_any(text, &baseline.keywords))
            .map(|baseline| baseline.level)
    }

    pub fn estimate(&self, profile: &ProfessionalProfile) -> AvailabilityEstimate {
        let (role_level, level_source) = self.classify(profile);
        let baseline = self
            .tables
            .baseline(role_level)
            .or_else(|| self.tables.baseline(RoleLevel::Professional));

        let company = profile
            .company_headcount
            .and_then(|headcount| self.tables.company_tier(headcount));
        let area = profile.functional_area.as_deref().and_then(|text| {
            self.tables
                .areas
                .iter()
                .find(|group| matches_any(text, &group.keywords))
        });

        let company_size = company.map_or(1.0, |t| t.multiplier);
        let functional_area = area.map_or(1.0, |a| a.multiplier);
        let combined = company_size * functional_area;

        let (daily_min, daily_max, weekly_min, weekly_max, baseline_category) = match baseline {
            Some(b) => (
                b.daily_min_minutes,
                b.daily_max_minutes,
                b.weekly_min_hours,
                b.weekly_max_hours,
                b.session_category,
            ),
            None => (0.0, 0.0, 0.0, 0.0, SessionCategory::Medium),
        };

        let daily_min_minutes = (daily_min * combined).round() as u32;
        let daily_max_minutes = (daily_max * combined).round() as u32;
        let session_category = SessionCategory::from_daily_max(daily_max_minutes);

        let multipliers = AvailabilityMultipliers {
            company_tier: company.map(|t| t.label.clone()),
            company_size,
            functional_area_group: area.map(|a| a.label.clone()),
            functional_area,
            combined,
        };
        let rationale = rationale(role_level, level_source, &multipliers, session_category);

        tracing::debug!(
            level = role_level.display_name(),
            combined,
            daily_max_minutes,
            "estimated availability"
        );

        AvailabilityEstimate {
            role_level,
            level_source,
            daily_min_minutes,
            daily_max_minutes,
            weekly_min_hours: round_one_decimal(weekly_min * combined),
            weekly_max_hours: round_one_decimal(weekly_max * combined),
            session_category,
            baseline_category,
            multipliers,
            rationale,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Case-insensitive keyword test. Short keywords (3 chars or fewer) only match
/// whole words so acronyms like "it" or "vp" do not fire inside longer words.
fn matches_any(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        if keyword.chars().count() <= 3 {
            tokens.iter().any(|t| *t == keyword)
        } else {
            lower.contains(&keyword)
        }
    })
}

fn direction(multiplier: f64) -> &'static str {
    if multiplier > 1.0 {
        "increases"
    } else if multiplier < 1.0 {
        "reduces"
    } else {
        "does not change"
    }
}

fn rationale(
    level: RoleLevel,
    source: LevelSource,
    multipliers: &AvailabilityMultipliers,
    category: SessionCategory,
) -> String {
    let mut parts = Vec::with_capacity(4);

    let origin = match source {
        LevelSource::RoleTitle => "from the role title",
        LevelSource::SeniorityField => "from the declared seniority",
        LevelSource::Default => "no role signal matched, using the default",
    };
    parts.push(format!("Detected role level: {} ({origin}).", level.display_name()));

    match &multipliers.company_tier {
        Some(tier) => parts.push(format!(
            "A {tier} employer {} available study time (x{:.2}).",
            direction(multipliers.company_size),
            multipliers.company_size
        )),
        None => parts.push("Employer size unknown; no size adjustment.".to_string()),
    }

    match &multipliers.functional_area_group {
        Some(group) => parts.push(format!(
            "The {group} area {} available study time (x{:.2}).",
            direction(multipliers.functional_area),
            multipliers.functional_area
        )),
        None => parts.push("Functional area not matched; neutral adjustment.".to_string()),
    }

    let category = match category {
        SessionCategory::Short => "short",
        SessionCategory::Medium => "medium",
        SessionCategory::Long => "long",
    };
    parts.push(format!("Recommended session length: {category}."));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        role: Option<&str>,
        seniority: Option<&str>,
        area: Option<&str>,
        headcount: Option<u32>,
    ) -> ProfessionalProfile {
        ProfessionalProfile {
            role_title: role.map(String::from),
            seniority: seniority.map(String::from),
            functional_area: area.map(String::from),
            company_headcount: headcount,
        }
    }

    #[test]
    fn classify_by_role_title() {
        let tables = AvailabilityTables::default();
        let estimator = AvailabilityEstimator::new(&tables);

        let cases = [
            ("Chief Operating Officer", RoleLevel::Executive),
            ("VP of Sales", RoleLevel::Executive),
            ("Engineering Director", RoleLevel::Management),
            ("Senior Manager", RoleLevel::Management),
            ("Senior Data Engineer", RoleLevel::Senior),
            ("Junior Developer", RoleLevel::Junior),
            ("Software Engineer", RoleLevel::Professional),
        ];
        for (title, expected) in cases {
            let (level, source) = estimator.classify(&profile(Some(title), None, None, None));
            assert_eq!(level, expected, "{title}");
            assert_eq!(source, LevelSource::RoleTitle);
        }
    }

    #[test]
    fn sales_executive_titles_are_not_c_suite() {
        let tables = AvailabilityTables::default();
        let estimator = AvailabilityEstimator::new(&tables);
        for title in ["Account Executive", "Sales Executive"] {
            let (level, _) = estimator.classify(&profile(Some(title), None, None, None));
            assert_eq!(level, RoleLevel::Professional, "{title}");
        }
        let (level, _) = estimator.classify(&profile(Some("Executive Director"), None, None, None));
        assert_eq!(level, RoleLevel::Executive);
        let (level, _) =
            estimator.classify(&profile(Some("Chief Executive Officer"), None, None, None));
        assert_eq!(level, RoleLevel::Executive);
    }

    #[test]
    fn director_is_not_mistaken_for_cto() {
        let tables = AvailabilityTables::default();
        let estimator = AvailabilityEstimator::new(&tables);
        let (level, _) = estimator.classify(&profile(Some("director"), None, None, None));
        assert_eq!(level, RoleLevel::Management);
    }

    #[test]
    fn seniority_field_used_when_title_ambiguous() {
        let tables = AvailabilityTables::default();
        let estimator = AvailabilityEstimator::new(&tables);
        let (level, source) =
            estimator.classify(&profile(Some("Team member"), Some("Junior"), None, None));
        assert_eq!(level, RoleLevel::Junior);
        assert_eq!(source, LevelSource::SeniorityField);
    }

    #[test]
    fn empty_profile_defaults_to_professional_with_neutral_multipliers() {
        let tables = AvailabilityTables::default();
        let estimate =
            AvailabilityEstimator::new(&tables).estimate(&ProfessionalProfile::default());
        assert_eq!(estimate.role_level, RoleLevel::Professional);
        assert_eq!(estimate.level_source, LevelSource::Default);
        assert_eq!(estimate.multipliers.combined, 1.0);
        assert_eq!(estimate.daily_min_minutes, 30);
        assert_eq!(estimate.daily_max_minutes, 60);
        assert_eq!(estimate.session_category, SessionCategory::Medium);
        assert!(estimate.rationale.contains("professional"));
    }

    #[test]
    fn multipliers_compound_and_round() {
        let tables = AvailabilityTables::default();
        let estimate = AvailabilityEstimator::new(&tables).estimate(&profile(
            Some("Data Analyst"),
            None,
            Some("Software development"),
            Some(8),
        ));
        // professional baseline 30-60 min, 3.0-6.0 h; micro 1.2 x technology 1.15 = 1.38
        assert!((estimate.multipliers.combined - 1.38).abs() < 1e-9);
        assert_eq!(estimate.daily_min_minutes, 41);
        assert_eq!(estimate.daily_max_minutes, 83);
        assert_eq!(estimate.weekly_min_hours, 4.1);
        assert_eq!(estimate.weekly_max_hours, 8.3);
        assert_eq!(estimate.session_category, SessionCategory::Long);
        assert!(estimate.rationale.contains("micro employer increases"));
        assert!(estimate.rationale.contains("technology area increases"));
    }

    #[test]
    fn sales_at_enterprise_reduces_time() {
        let tables = AvailabilityTables::default();
        let estimate = AvailabilityEstimator::new(&tables).estimate(&profile(
            Some("Regional VP"),
            None,
            Some("Commercial"),
            Some(5_000),
        ));
        assert_eq!(estimate.role_level, RoleLevel::Executive);
        // 30 * 0.85 * 0.85 = 21.675
        assert_eq!(estimate.daily_max_minutes, 22);
        assert_eq!(estimate.session_category, SessionCategory::Short);
        assert!(estimate.rationale.contains("reduces"));
    }

    #[test]
    fn category_thresholds() {
        assert_eq!(SessionCategory::from_daily_max(35), SessionCategory::Short);
        assert_eq!(SessionCategory::from_daily_max(36), SessionCategory::Medium);
        assert_eq!(SessionCategory::from_daily_max(60), SessionCategory::Medium);
        assert_eq!(SessionCategory::from_daily_max(61), SessionCategory::Long);
    }
}
