//! Deadline feasibility for organization-sponsored learners.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationResult;

/// A course assigned by an organization with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAssignment {
    pub course_id: String,
    #[serde(default)]
    pub title: String,
    pub due_date: NaiveDate,
    /// Completion percentage, 0-100.
    #[serde(default)]
    pub progress_percent: f64,
    /// Full course length; the remaining share is derived from progress.
    #[serde(default)]
    pub total_minutes: u32,
}

impl CourseAssignment {
    pub fn is_complete(&self) -> bool {
        self.progress_percent >= 100.0
    }

    /// Content minutes still to study, pro-rated by completion.
    pub fn remaining_minutes(&self) -> u32 {
        let left = (100.0 - self.progress_percent.clamp(0.0, 100.0)) / 100.0;
        (self.total_minutes as f64 * left).ceil() as u32
    }

    fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.course_id
        } else {
            &self.title
        }
    }
}

/// Result of checking a weekly pace against assignment due dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineValidation {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub nearest_deadline: Option<NaiveDate>,
    pub nearest_course_id: Option<String>,
    pub days_remaining: Option<i64>,
    /// Outstanding minutes due on the nearest deadline.
    pub remaining_minutes: u32,
    pub required_weekly_minutes: Option<u32>,
    pub proposed_weekly_minutes: u32,
    /// Proposed minus required weekly minutes; negative when behind.
    pub margin_weekly_minutes: Option<i64>,
    /// Outstanding assignments whose due date is already behind us.
    pub expired_course_ids: Vec<String>,
    /// The subset of `result.errors` that must stop plan generation.
    #[serde(default)]
    pub blocking_errors: Vec<String>,
    pub feasible: bool,
}

/// Weekly minutes needed to cover `remaining` minutes in `days`.
fn required_pace(remaining: u32, days: i64) -> u32 {
    let weeks = days as f64 / 7.0;
    (remaining as f64 / weeks).ceil() as u32
}

/// Check whether `weekly_minutes` of study meets every outstanding assignment.
pub fn validate_deadlines(
    assignments: &[CourseAssignment],
    weekly_minutes: u32,
    today: NaiveDate,
) -> DeadlineValidation {
    let mut result = ValidationResult::new();

    let mut outstanding: Vec<&CourseAssignment> =
        assignments.iter().filter(|a| !a.is_complete()).collect();
    outstanding.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });

    let mut expired_course_ids = Vec::new();
    let mut blocking_errors = Vec::new();
    for expired in outstanding.iter().filter(|a| a.due_date < today) {
        let message = format!(
            "The deadline for '{}' ({}) has already passed",
            expired.label(),
            expired.due_date
        );
        expired_course_ids.push(expired.course_id.clone());
        blocking_errors.push(message.clone());
        result.error(message);
    }
    let upcoming: Vec<&CourseAssignment> =
        outstanding.into_iter().filter(|a| a.due_date >= today).collect();

    let Some(nearest) = upcoming.first() else {
        let feasible = result.errors.is_empty();
        return DeadlineValidation {
            result,
            nearest_deadline: None,
            nearest_course_id: None,
            days_remaining: None,
            remaining_minutes: 0,
            required_weekly_minutes: None,
            proposed_weekly_minutes: weekly_minutes,
            margin_weekly_minutes: None,
            expired_course_ids,
            blocking_errors,
            feasible,
        };
    };

    let nearest_date = nearest.due_date;
    let days_remaining = (nearest_date - today).num_days();
    let remaining_minutes: u32 = upcoming
        .iter()
        .filter(|a| a.due_date == nearest_date)
        .map(|a| a.remaining_minutes())
        .sum();

    let required_weekly_minutes = if days_remaining > 0 {
        Some(required_pace(remaining_minutes, days_remaining))
    } else {
        None
    };

    if days_remaining == 0 && remaining_minutes > 0 {
        result.error(format!(
            "'{}' is due today with {remaining_minutes} min still to study",
            nearest.label()
        ));
        result.suggest("Ask your organization for a deadline extension");
    }

    let margin_weekly_minutes =
        required_weekly_minutes.map(|req| weekly_minutes as i64 - req as i64);
    if let (Some(required), Some(margin)) = (required_weekly_minutes, margin_weekly_minutes) {
        if margin < 0 {
            result.error(format!(
                "At {weekly_minutes} min/week '{}' will not be finished by {nearest_date}; \
                 {required} min/week are needed",
                nearest.label()
            ));
            result.suggest(format!("Increase weekly study time by at least {} min", -margin));
            result.suggest("Add study days or lengthen your time blocks");
            result.suggest("Ask your organization for a deadline extension");
        }
    }

    // Later deadlines accumulate everything due before them.
    let mut cumulative = 0u32;
    for assignment in &upcoming {
        cumulative += assignment.remaining_minutes();
        if assignment.due_date == nearest_date {
            continue;
        }
        let days = (assignment.due_date - today).num_days();
        let pace = required_pace(cumulative, days);
        if pace > weekly_minutes && required_weekly_minutes.map_or(true, |req| pace > req) {
            result.warn(format!(
                "Finishing '{}' by {} together with earlier assignments needs {pace} min/week",
                assignment.label(),
                assignment.due_date
            ));
        }
    }

    let feasible = result.errors.is_empty();
    tracing::debug!(
        nearest = %nearest_date,
        days_remaining,
        remaining_minutes,
        feasible,
        "deadline feasibility checked"
    );

    DeadlineValidation {
        result,
        nearest_deadline: Some(nearest_date),
        nearest_course_id: Some(nearest.course_id.clone()),
        days_remaining: Some(days_remaining),
        remaining_minutes,
        required_weekly_minutes,
        proposed_weekly_minutes: weekly_minutes,
        margin_weekly_minutes,
        expired_course_ids,
        blocking_errors,
        feasible,
    }
}
