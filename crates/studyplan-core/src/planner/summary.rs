use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PlannedSession;

/// Aggregate figures for a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanSummary {
    pub total_sessions: usize,
    pub total_study_minutes: u32,
    pub total_break_minutes: u32,
    pub sessions_per_week: f64,
    /// Calendar weeks from the start date to the last session.
    pub estimated_weeks: u32,
    pub estimated_completion_date: Option<NaiveDate>,
    /// Scheduled lesson count keyed by course id.
    pub lessons_per_course: BTreeMap<String, usize>,
}

pub(crate) fn summarize(start_date: NaiveDate, sessions: &[PlannedSession]) -> PlanSummary {
    let Some(last) = sessions.iter().map(|s| s.date).max() else {
        return PlanSummary::default();
    };

    let mut lessons_per_course = BTreeMap::new();
    for session in sessions {
        *lessons_per_course.entry(session.course_id.clone()).or_insert(0) += 1;
    }

    let span_days = (last - start_date).num_days().max(0) + 1;
    let estimated_weeks = (span_days as u32).div_ceil(7);
    let sessions_per_week = (sessions.len() as f64 / estimated_weeks as f64 * 10.0).round() / 10.0;

    PlanSummary {
        total_sessions: sessions.len(),
        total_study_minutes: sessions.iter().map(|s| s.duration_minutes).sum(),
        total_break_minutes: sessions.iter().map(|s| s.break_minutes).sum(),
        sessions_per_week,
        estimated_weeks,
        estimated_completion_date: Some(last),
        lessons_per_course,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::StudyDay;
    use crate::planner::SessionStatus;
    use chrono::{Duration, NaiveTime};

    fn session(course: &str, date: NaiveDate, study: u32, breaks: u32) -> PlannedSession {
        PlannedSession {
            id: "s".to_string(),
            date,
            weekday: StudyDay::of(date),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: study,
            break_minutes: breaks,
            gross_minutes: study + breaks,
            course_id: course.to_string(),
            course_title: String::new(),
            lesson_id: String::new(),
            lesson_title: String::new(),
            module_id: String::new(),
            breaks: Vec::new(),
            review_lesson_ids: Vec::new(),
            status: SessionStatus::Planned,
        }
    }

    #[test]
    fn empty_plan_has_empty_totals() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let summary = summarize(start, &[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.estimated_completion_date, None);
        assert_eq!(summary.sessions_per_week, 0.0);
    }

    #[test]
    fn totals_span_and_per_course_counts() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let sessions = vec![
            session("a", start, 30, 5),
            session("a", start + Duration::days(2), 45, 10),
            session("b", start + Duration::days(7), 70, 30),
        ];
        let summary = summarize(start, &sessions);

        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_study_minutes, 145);
        assert_eq!(summary.total_break_minutes, 45);
        assert_eq!(summary.estimated_weeks, 2);
        assert_eq!(summary.sessions_per_week, 1.5);
        assert_eq!(summary.estimated_completion_date, Some(start + Duration::days(7)));
        assert_eq!(summary.lessons_per_course["a"], 2);
        assert_eq!(summary.lessons_per_course["b"], 1);
    }
}
