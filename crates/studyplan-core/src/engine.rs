//! End-to-end planning facade.
//!
//! Runs the whole pipeline for one request: lesson analysis, route building,
//! availability estimation, pre-generation validation and, when nothing
//! blocks, plan generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::availability::{
    AvailabilityEstimate, AvailabilityEstimator, AvailabilityTables, ProfessionalProfile,
};
use crate::calendar::{StudyDay, TimeBlock};
use crate::catalog::{Course, InMemoryCatalog};
use crate::error::Result;
use crate::lesson_time::{CourseSetAnalysis, LessonTimeAnalyzer};
use crate::planner::{
    BreakConfig, GeneratedPlan, GeneratorSettings, PlanGenerator, SchedulerFeatures, Sponsorship,
    StudyModeConfig, StudyPlanConfig,
};
use crate::route::{LearnerCourse, LearningRouteBuilder, RouteReport};
use crate::storage::EngineConfig;
use crate::validation::{
    validate_deadlines, validate_schedule, validate_session_bounds, CourseAssignment,
    DeadlineValidation, ScheduleValidation, SessionTimingValidation,
};

/// Scheduling preferences declared by the learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPreferences {
    pub study_days: Vec<StudyDay>,
    pub time_blocks: Vec<TimeBlock>,
    pub min_session_minutes: u32,
    pub max_session_minutes: u32,
    #[serde(default)]
    pub breaks: BreakConfig,
    /// Falls back to the configured daily cap when absent.
    #[serde(default)]
    pub study_mode: Option<StudyModeConfig>,
    #[serde(default)]
    pub target_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub features: SchedulerFeatures,
}

/// Everything the calling layer gathered for one planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub learner_id: String,
    #[serde(default)]
    pub profile: ProfessionalProfile,
    #[serde(default)]
    pub sponsorship: Sponsorship,
    /// Catalog snapshot covering at least the learner's courses.
    pub catalog: Vec<Course>,
    pub courses: Vec<LearnerCourse>,
    pub preferences: SchedulingPreferences,
    pub start_date: NaiveDate,
    /// Reference date for deadline checks; defaults to `start_date`.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl PlanRequest {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or(self.start_date)
    }
}

/// Reports produced for a request, plus the plan when generation ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub analysis: CourseSetAnalysis,
    pub route: RouteReport,
    pub availability: AvailabilityEstimate,
    pub timing: SessionTimingValidation,
    pub schedule: ScheduleValidation,
    #[serde(default)]
    pub deadline: Option<DeadlineValidation>,
    /// True when a blocking validation error prevented generation.
    pub blocked: bool,
    #[serde(default)]
    pub plan: Option<GeneratedPlan>,
}

impl PlanOutcome {
    /// Every blocking error across the validation reports.
    pub fn blocking_errors(&self) -> Vec<&str> {
        let mut errors: Vec<&str> = Vec::new();
        errors.extend(self.timing.result.errors.iter().map(String::as_str));
        errors.extend(self.schedule.result.errors.iter().map(String::as_str));
        if let Some(deadline) = &self.deadline {
            errors.extend(deadline.blocking_errors.iter().map(String::as_str));
        }
        errors
    }
}

/// Planning engine holding configuration and lookup tables.
pub struct PlanningEngine {
    config: EngineConfig,
    tables: AvailabilityTables,
}

impl PlanningEngine {
    pub fn new(config: EngineConfig, tables: AvailabilityTables) -> Self {
        Self { config, tables }
    }

    /// Build from configuration, loading external availability tables if set.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let tables = config.availability_tables()?;
        Ok(Self::new(config, tables))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &AvailabilityTables {
        &self.tables
    }

    /// Analyze and validate without generating.
    pub fn evaluate(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        let catalog = InMemoryCatalog::new(request.catalog.clone())?;
        let prefs = &request.preferences;

        let analyzer =
            LessonTimeAnalyzer::with_overhead(self.config.lessons.interaction_overhead_minutes);
        let course_ids: Vec<&str> = request.courses.iter().map(|c| c.course_id.as_str()).collect();
        let analysis = analyzer.analyze_courses(&catalog, &course_ids[..]);

        let builder = LearningRouteBuilder::new(self.config.route_settings());
        let mut route = builder.build(&request.courses, &analysis);
        route.suggestions = builder.suggest_complementary(&request.courses, &catalog);

        let availability = AvailabilityEstimator::new(&self.tables).estimate(&request.profile);

        let timing = validate_session_bounds(
            prefs.min_session_minutes,
            prefs.max_session_minutes,
            &analysis,
            &self.config.timing_thresholds(),
        );
        let schedule = validate_schedule(
            &prefs.study_days,
            &prefs.time_blocks,
            prefs.min_session_minutes,
            &self.config.schedule_thresholds(),
        );

        let deadline = (request.sponsorship == Sponsorship::Organization).then(|| {
            let assignments = assignments(&request.courses, &analysis);
            let weekly = weekly_study_minutes(prefs, &schedule.schedulable_days);
            validate_deadlines(&assignments, weekly, request.today())
        });

        let mut outcome = PlanOutcome {
            analysis,
            route,
            availability,
            timing,
            schedule,
            deadline,
            blocked: false,
            plan: None,
        };
        outcome.blocked = !outcome.blocking_errors().is_empty();
        Ok(outcome)
    }

    /// Evaluate the request and generate a plan unless validation blocks it.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanOutcome> {
        let mut outcome = self.evaluate(request)?;
        if outcome.blocked {
            tracing::info!(
                learner = %request.learner_id,
                errors = outcome.blocking_errors().len(),
                "plan generation refused"
            );
            return Ok(outcome);
        }

        let config = self.plan_config(request, &outcome);
        let generator = PlanGenerator::with_settings(GeneratorSettings {
            iterations_per_selected_day: self.config.generation.iterations_per_selected_day,
            features: request.preferences.features,
        })
        .with_breakdown(Box::new(self.config.pomodoro_breakdown()));

        outcome.plan = Some(generator.generate(&config, &outcome.analysis));
        Ok(outcome)
    }

    fn plan_config(&self, request: &PlanRequest, outcome: &PlanOutcome) -> StudyPlanConfig {
        let prefs = &request.preferences;
        let study_mode = prefs.study_mode.unwrap_or(StudyModeConfig {
            max_consecutive_hours: self.config.generation.default_max_consecutive_hours,
            ..StudyModeConfig::default()
        });
        let deadlines = if request.sponsorship == Sponsorship::Organization {
            assignments(&request.courses, &outcome.analysis)
        } else {
            Vec::new()
        };

        StudyPlanConfig {
            learner_id: request.learner_id.clone(),
            sponsorship: request.sponsorship,
            course_ids: request.courses.iter().map(|c| c.course_id.clone()).collect(),
            route: outcome.route.route.clone(),
            min_session_minutes: prefs.min_session_minutes,
            max_session_minutes: prefs.max_session_minutes,
            study_days: prefs.study_days.clone(),
            time_blocks: prefs.time_blocks.clone(),
            breaks: prefs.breaks,
            start_date: request.start_date,
            target_end_date: prefs.target_end_date,
            deadlines,
            study_mode,
        }
    }
}

/// Due-dated learner courses as organization assignments.
fn assignments(courses: &[LearnerCourse], analysis: &CourseSetAnalysis) -> Vec<CourseAssignment> {
    courses
        .iter()
        .filter_map(|course| {
            let due_date = course.due_date?;
            Some(CourseAssignment {
                course_id: course.course_id.clone(),
                title: course.title.clone(),
                due_date,
                progress_percent: course.progress_percent,
                total_minutes: analysis.course(&course.course_id).map_or(0, |c| c.total_minutes),
            })
        })
        .collect()
}

/// Study minutes one week of the preferences can hold: one session per
/// schedulable day, bounded by the block and the maximum session length.
fn weekly_study_minutes(prefs: &SchedulingPreferences, schedulable_days: &[StudyDay]) -> u32 {
    let days: BTreeSet<StudyDay> = schedulable_days.iter().copied().collect();
    let mut seen = BTreeSet::new();
    prefs
        .time_blocks
        .iter()
        .filter(|block| seen.insert(block.day) && days.contains(&block.day))
        .map(|block| block.duration_minutes().min(prefs.max_session_minutes))
        .sum()
}
