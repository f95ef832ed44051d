//! # Studyplan Core Library
//!
//! This library provides the study-plan generation engine: it turns a
//! learner's course backlog, weekly availability and session preferences into
//! a dated sequence of study sessions. The `studyplan` CLI is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Lesson timing**: per-lesson and per-course minute estimates from
//!   catalog content durations
//! - **Availability**: study-time budget heuristics from professional-profile
//!   signals, driven by immutable lookup tables
//! - **Route**: ordering of the learner's courses into one study sequence
//! - **Validation**: session bounds, study days and blocks, break schedules
//!   and deadline feasibility, all reported as data
//! - **Planner**: the forward calendar walk producing `PlannedSession`s
//!
//! ## Key Components
//!
//! - [`PlanningEngine`]: full pipeline for one request
//! - [`PlanGenerator`]: core scheduler
//! - [`LearningRouteBuilder`]: route ordering and suggestions
//! - [`EngineConfig`]: engine configuration management
//! - [`CourseCatalog`]: trait for the catalog collaborator

pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod lesson_time;
pub mod planner;
pub mod route;
pub mod storage;
pub mod study_mode;
pub mod validation;

pub use availability::{
    AvailabilityEstimate, AvailabilityEstimator, AvailabilityTables, ProfessionalProfile,
};
pub use calendar::{StudyDay, TimeBlock};
pub use catalog::{Course, CourseCatalog, DifficultyLevel, InMemoryCatalog, Lesson, LessonContent};
pub use engine::{PlanOutcome, PlanRequest, PlanningEngine, SchedulingPreferences};
pub use error::{CatalogError, ConfigError, CoreError};
pub use lesson_time::{CourseSetAnalysis, LessonTimeAnalyzer};
pub use planner::{GeneratedPlan, PlanGenerator, PlannedSession, SchedulerFeatures, StudyPlanConfig};
pub use route::{LearnerCourse, LearningRoute, LearningRouteBuilder, RouteReport};
pub use storage::EngineConfig;
pub use study_mode::{PomodoroBreakdown, SessionBreakdown, StudyMode};
pub use validation::{compute_break_schedule, BreakScheduleEntry, ValidationResult};
