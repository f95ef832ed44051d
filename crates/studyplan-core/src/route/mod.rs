//! Learning route construction.
//!
//! Orders a learner's courses into one study sequence: difficulty first, then
//! courses already under way, then title. Route totals are derived from the
//! items on demand.

mod suggestions;

pub use suggestions::{ComplementaryCourse, SuggestionPriority};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::DifficultyLevel;
use crate::lesson_time::CourseSetAnalysis;

/// A course the learner owns or was assigned, with current progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerCourse {
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: DifficultyLevel,
    /// Completion percentage, 0-100.
    #[serde(default)]
    pub progress_percent: f64,
    /// `false` when the course was assigned by an organization.
    #[serde(default = "default_owned")]
    pub owned: bool,
    /// Organization due date, if any.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

fn default_owned() -> bool {
    true
}

impl LearnerCourse {
    pub fn is_completed(&self) -> bool {
        self.progress_percent >= 100.0
    }

    pub fn is_in_progress(&self) -> bool {
        self.progress_percent > 0.0 && !self.is_completed()
    }
}

/// One position in the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRouteItem {
    pub course_id: String,
    pub title: String,
    pub category: String,
    pub level: DifficultyLevel,
    /// 1-based position in the route.
    pub position: usize,
    pub owned: bool,
    pub progress_percent: f64,
    pub estimated_minutes: u32,
    pub lesson_count: usize,
    pub rationale: String,
}

impl LearningRouteItem {
    pub fn is_completed(&self) -> bool {
        self.progress_percent >= 100.0
    }

    /// Minutes left, pro-rated by progress.
    pub fn remaining_minutes(&self) -> u32 {
        let left = (100.0 - self.progress_percent.clamp(0.0, 100.0)) / 100.0;
        (self.estimated_minutes as f64 * left).ceil() as u32
    }
}

/// Ordered route. Aggregates are computed from `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRoute {
    pub items: Vec<LearningRouteItem>,
    /// Weekly study hours assumed for the week estimate.
    pub weekly_study_hours: f64,
}

impl LearningRoute {
    pub fn total_minutes(&self) -> u32 {
        self.items.iter().map(|i| i.estimated_minutes).sum()
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.items.iter().map(|i| i.remaining_minutes()).sum()
    }

    pub fn course_count(&self) -> usize {
        self.items.len()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_completed()).count()
    }

    /// Weeks needed for the remaining minutes at the assumed weekly pace.
    pub fn estimated_weeks(&self) -> u32 {
        let weekly_minutes = self.weekly_study_hours * 60.0;
        if weekly_minutes <= 0.0 {
            return 0;
        }
        (self.remaining_minutes() as f64 / weekly_minutes).ceil() as u32
    }

    pub fn totals(&self) -> RouteTotals {
        RouteTotals {
            total_minutes: self.total_minutes(),
            remaining_minutes: self.remaining_minutes(),
            course_count: self.course_count(),
            completed_count: self.completed_count(),
            estimated_weeks: self.estimated_weeks(),
        }
    }

    pub fn item(&self, course_id: &str) -> Option<&LearningRouteItem> {
        self.items.iter().find(|i| i.course_id == course_id)
    }
}

/// Snapshot of the derived route aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTotals {
    pub total_minutes: u32,
    pub remaining_minutes: u32,
    pub course_count: usize,
    pub completed_count: usize,
    pub estimated_weeks: u32,
}

/// Builder output: the route plus advisory notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub route: LearningRoute,
    pub totals: RouteTotals,
    pub warnings: Vec<String>,
    pub tips: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<ComplementaryCourse>,
}

/// Tunables for route building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSettings {
    pub weekly_study_hours: f64,
    pub max_suggestions: usize,
    pub max_courses_before_warning: usize,
    /// Beginner progress considered enough before advanced material.
    pub prerequisite_progress_percent: f64,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            weekly_study_hours: 3.5,
            max_suggestions: 3,
            max_courses_before_warning: 5,
            prerequisite_progress_percent: 50.0,
        }
    }
}

/// Builds learning routes from learner courses.
#[derive(Debug, Clone, Default)]
pub struct LearningRouteBuilder {
    settings: RouteSettings,
}

impl LearningRouteBuilder {
    pub fn new(settings: RouteSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RouteSettings {
        &self.settings
    }

    /// Order courses and annotate each item. Estimates come from `analysis`;
    /// courses it does not cover count as zero minutes.
    pub fn build(&self, courses: &[LearnerCourse], analysis: &CourseSetAnalysis) -> RouteReport {
        let mut ordered: Vec<&LearnerCourse> = courses.iter().collect();
        ordered.sort_by(|a, b| {
            a.level
                .rank()
                .cmp(&b.level.rank())
                .then_with(|| (a.progress_percent <= 0.0).cmp(&(b.progress_percent <= 0.0)))
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
                .then_with(|| a.course_id.cmp(&b.course_id))
        });

        let mut seen_ranks = BTreeSet::new();
        let mut items = Vec::with_capacity(ordered.len());
        for (index, course) in ordered.iter().enumerate() {
            let rank = course.level.rank();
            let rationale = if course.is_completed() {
                "Already completed, kept for reference".to_string()
            } else if course.is_in_progress() {
                format!("In progress at {:.0}%, prioritized", course.progress_percent)
            } else if seen_ranks.contains(&rank) {
                format!("Continues the {} level", course.level.display_name())
            } else if seen_ranks.iter().any(|&r| r < rank) {
                format!(
                    "Level jump to {} after completing prerequisites",
                    course.level.display_name()
                )
            } else {
                format!("Starting point at the {} level", course.level.display_name())
            };
            seen_ranks.insert(rank);

            let estimate = analysis.course(&course.course_id);
            items.push(LearningRouteItem {
                course_id: course.course_id.clone(),
                title: course.title.clone(),
                category: course.category.clone(),
                level: course.level,
                position: index + 1,
                owned: course.owned,
                progress_percent: course.progress_percent,
                estimated_minutes: estimate.map_or(0, |e| e.total_minutes),
                lesson_count: estimate.map_or(0, |e| e.lesson_count),
                rationale,
            });
        }

        let route = LearningRoute {
            items,
            weekly_study_hours: self.settings.weekly_study_hours,
        };
        let totals = route.totals();
        let warnings = self.warnings(courses);
        let tips = self.tips(&route, &totals);

        tracing::debug!(
            courses = totals.course_count,
            remaining_minutes = totals.remaining_minutes,
            "built learning route"
        );

        RouteReport {
            route,
            totals,
            warnings,
            tips,
            suggestions: Vec::new(),
        }
    }

    fn warnings(&self, courses: &[LearnerCourse]) -> Vec<String> {
        let mut warnings = Vec::new();

        let advanced: Vec<&str> = courses
            .iter()
            .filter(|c| c.level == DifficultyLevel::Advanced && !c.is_completed())
            .map(|c| c.title.as_str())
            .collect();
        let prepared = courses.iter().any(|c| {
            c.level == DifficultyLevel::Beginner
                && c.progress_percent >= self.settings.prerequisite_progress_percent
        });
        if !advanced.is_empty() && !prepared {
            warnings.push(format!(
                "Advanced material ({}) without a beginner course at {:.0}% or more; \
                 expect a steep start",
                advanced.join(", "),
                self.settings.prerequisite_progress_percent
            ));
        }

        if courses.len() > self.settings.max_courses_before_warning {
            warnings.push(format!(
                "The route has {} courses; more than {} at once spreads attention thin",
                courses.len(),
                self.settings.max_courses_before_warning
            ));
        }
        warnings
    }

    fn tips(&self, route: &LearningRoute, totals: &RouteTotals) -> Vec<String> {
        let mut tips = Vec::new();

        let in_progress: Vec<&str> = route
            .items
            .iter()
            .filter(|i| i.progress_percent > 0.0 && !i.is_completed())
            .map(|i| i.title.as_str())
            .collect();
        if !in_progress.is_empty() {
            tips.push(format!("Finish in-progress courses first: {}", in_progress.join(", ")));
        }
        if totals.completed_count > 0 {
            tips.push(format!(
                "{} completed course(s) stay in the route for reference and are not scheduled",
                totals.completed_count
            ));
        }
        if totals.estimated_weeks > 12 {
            tips.push(format!(
                "At {:.1} h/week this route takes about {} weeks; more weekly time shortens it",
                route.weekly_study_hours, totals.estimated_weeks
            ));
        }
        tips
    }
}
