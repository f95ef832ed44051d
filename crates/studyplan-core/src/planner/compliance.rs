use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::generator::PendingLesson;
use super::PlannedSession;
use crate::validation::CourseAssignment;

/// How one assignment fares against the generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCompliance {
    pub course_id: String,
    pub title: String,
    pub due_date: NaiveDate,
    /// Date of the last session for the course; `None` when the plan does
    /// not schedule all of its remaining lessons.
    pub estimated_completion_date: Option<NaiveDate>,
    /// Days between completion and due date; negative when late.
    pub margin_days: Option<i64>,
    pub on_track: bool,
}

/// Deadline compliance for an organization-sponsored plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineComplianceReport {
    pub assignments: Vec<AssignmentCompliance>,
    /// True when every assignment is on track.
    pub feasible: bool,
}

/// Compare each assignment with scheduled work still pending in the plan.
/// Assignments for courses with nothing left to schedule are skipped.
pub(crate) fn check_compliance(
    assignments: &[CourseAssignment],
    pending: &[PendingLesson<'_>],
    sessions: &[PlannedSession],
) -> DeadlineComplianceReport {
    let mut needed: BTreeMap<&str, usize> = BTreeMap::new();
    for lesson in pending {
        *needed.entry(lesson.course_id).or_insert(0) += 1;
    }

    let mut scheduled: BTreeMap<&str, (usize, NaiveDate)> = BTreeMap::new();
    for session in sessions {
        let entry = scheduled
            .entry(session.course_id.as_str())
            .or_insert((0, session.date));
        entry.0 += 1;
        entry.1 = entry.1.max(session.date);
    }

    let mut report = Vec::new();
    for assignment in assignments {
        let Some(&lessons_needed) = needed.get(assignment.course_id.as_str()) else {
            continue;
        };
        let completion = scheduled
            .get(assignment.course_id.as_str())
            .filter(|(count, _)| *count >= lessons_needed)
            .map(|(_, last)| *last);
        let margin_days = completion.map(|done| (assignment.due_date - done).num_days());

        report.push(AssignmentCompliance {
            course_id: assignment.course_id.clone(),
            title: assignment.title.clone(),
            due_date: assignment.due_date,
            estimated_completion_date: completion,
            margin_days,
            on_track: margin_days.is_some_and(|m| m >= 0),
        });
    }

    let feasible = report.iter().all(|a| a.on_track);
    if !feasible {
        tracing::info!(
            late = report.iter().filter(|a| !a.on_track).count(),
            "plan misses organization deadlines"
        );
    }
    DeadlineComplianceReport {
        assignments: report,
        feasible,
    }
}
