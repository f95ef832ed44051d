//! Study plan generation.
//!
//! The generator walks the calendar forward from the start date and places
//! one lesson per eligible study day:
//! - Unselected weekdays and weekdays without a time block are skipped
//! - Session length is the lesson length clamped to the learner's bounds
//! - A daily cap guards against burnout
//! - Breaks come from the tiered schedule, optionally supplemented by the
//!   study mode's own segmentation
//!
//! Generation always terminates: the walk is bounded by an iteration cap
//! proportional to the number of selected days.

mod compliance;
mod generator;
mod summary;

pub use compliance::{AssignmentCompliance, DeadlineComplianceReport};
pub use generator::{GeneratorSettings, PlanGenerator};
pub use summary::PlanSummary;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::{hhmm, StudyDay, TimeBlock};
use crate::route::LearningRoute;
use crate::study_mode::StudyMode;
use crate::validation::{BreakScheduleEntry, CourseAssignment};

/// Who pays for the learner's courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sponsorship {
    #[default]
    Independent,
    Organization,
}

/// Which scheduler behaviours are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerFeatures {
    /// Burnout guard, study-mode breaks, spaced repetition and deadline compliance.
    #[default]
    Full,
    /// Plain distribution of lessons over the selected days.
    Distributive,
}

impl SchedulerFeatures {
    pub fn is_full(&self) -> bool {
        matches!(self, SchedulerFeatures::Full)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Study-mode parameters for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudyModeConfig {
    #[serde(default)]
    pub mode: StudyMode,
    /// Daily cap on study time, in hours.
    #[serde(default = "default_max_consecutive_hours")]
    pub max_consecutive_hours: f64,
    #[serde(default)]
    pub spaced_repetition: bool,
}

fn default_max_consecutive_hours() -> f64 {
    3.0
}

impl Default for StudyModeConfig {
    fn default() -> Self {
        Self {
            mode: StudyMode::Standard,
            max_consecutive_hours: default_max_consecutive_hours(),
            spaced_repetition: false,
        }
    }
}

impl StudyModeConfig {
    /// Daily cap in minutes.
    pub fn daily_cap_minutes(&self) -> u32 {
        (self.max_consecutive_hours.max(0.0) * 60.0).round() as u32
    }
}

/// Everything the generator needs for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanConfig {
    pub learner_id: String,
    #[serde(default)]
    pub sponsorship: Sponsorship,
    pub course_ids: Vec<String>,
    pub route: LearningRoute,
    pub min_session_minutes: u32,
    pub max_session_minutes: u32,
    pub study_days: Vec<StudyDay>,
    pub time_blocks: Vec<TimeBlock>,
    #[serde(default)]
    pub breaks: BreakConfig,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub target_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub deadlines: Vec<CourseAssignment>,
    #[serde(default)]
    pub study_mode: StudyModeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Planned,
}

/// One scheduled study session. Sessions are never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSession {
    pub id: String,
    pub date: NaiveDate,
    pub weekday: StudyDay,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Net study minutes.
    pub duration_minutes: u32,
    pub break_minutes: u32,
    /// Study plus breaks.
    pub gross_minutes: u32,
    pub course_id: String,
    pub course_title: String,
    pub lesson_id: String,
    pub lesson_title: String,
    pub module_id: String,
    pub breaks: Vec<BreakScheduleEntry>,
    /// Lessons to revisit, studied 1, 3 or 7 days before.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub review_lesson_ids: Vec<String>,
    pub status: SessionStatus,
}

/// A complete generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub id: String,
    pub features: SchedulerFeatures,
    pub config: StudyPlanConfig,
    pub sessions: Vec<PlannedSession>,
    pub summary: PlanSummary,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub deadline_report: Option<DeadlineComplianceReport>,
}

impl GeneratedPlan {
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
