//! Study day and time-block sanity checks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ValidationResult;
use crate::calendar::{StudyDay, TimeBlock};

/// Thresholds under which a weekly schedule is considered sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleThresholds {
    pub min_days_per_week: usize,
    pub min_weekly_minutes: u32,
}

impl Default for ScheduleThresholds {
    fn default() -> Self {
        Self {
            min_days_per_week: 3,
            min_weekly_minutes: 60,
        }
    }
}

/// Result of checking selected days and time blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleValidation {
    #[serde(flatten)]
    pub result: ValidationResult,
    /// Selected days that have a usable block.
    pub schedulable_days: Vec<StudyDay>,
    /// Capacity across one week of usable blocks.
    pub weekly_block_minutes: u32,
}

/// Check the learner's weekly day/block configuration.
///
/// Only the first block configured for a weekday is used by the generator;
/// later duplicates are reported and ignored.
pub fn validate_schedule(
    selected_days: &[StudyDay],
    blocks: &[TimeBlock],
    min_session_minutes: u32,
    thresholds: &ScheduleThresholds,
) -> ScheduleValidation {
    let mut result = ValidationResult::new();
    let days: BTreeSet<StudyDay> = selected_days.iter().copied().collect();

    if days.is_empty() {
        result.error("Select at least one study day");
    }
    if blocks.is_empty() {
        result.error("Configure at least one time block");
    }

    let mut schedulable_days = Vec::new();
    let mut weekly_block_minutes = 0;
    let mut seen = BTreeSet::new();

    for block in blocks {
        if !seen.insert(block.day) {
            result.warn(format!(
                "More than one time block on {}; only the first one is used",
                block.day
            ));
            continue;
        }
        if !days.contains(&block.day) {
            continue;
        }
        if block.is_inverted() {
            result.error(format!(
                "The time block on {} ends before it starts ({} - {})",
                block.day,
                block.start.format("%H:%M"),
                block.end.format("%H:%M")
            ));
            continue;
        }

        let capacity = block.duration_minutes();
        if capacity < min_session_minutes {
            result.error(format!(
                "The time block on {} lasts {capacity} min, shorter than the \
                 {min_session_minutes} min minimum session",
                block.day
            ));
            continue;
        }
        schedulable_days.push(block.day);
        weekly_block_minutes += capacity;
    }

    if !days.is_empty() && !blocks.is_empty() && schedulable_days.is_empty() {
        result.error("None of the selected days has a usable time block");
    }

    for day in &days {
        if !seen.contains(day) {
            result.warn(format!("{day} is selected but has no time block; it will be skipped"));
        }
    }

    if !days.is_empty() && days.len() < thresholds.min_days_per_week {
        result.warn(format!(
            "Only {} study day(s) per week; progress will be slow",
            days.len()
        ));
        result.suggest(format!(
            "Studying at least {} days a week keeps material fresh",
            thresholds.min_days_per_week
        ));
    }
    if !schedulable_days.is_empty() && weekly_block_minutes < thresholds.min_weekly_minutes {
        result.warn(format!(
            "Only {weekly_block_minutes} min of study time per week; consider longer blocks"
        ));
    }
    if days.len() == StudyDay::ALL.len() {
        result.warn("Studying all 7 days leaves no rest day");
        result.suggest("Keep at least one day a week free to recover");
    }

    schedulable_days.sort();
    ScheduleValidation {
        result,
        schedulable_days,
        weekly_block_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn block(day: StudyDay, start: (u32, u32), end: (u32, u32)) -> TimeBlock {
        TimeBlock::new(
            day,
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        )
    }

    fn mwf() -> Vec<StudyDay> {
        vec![StudyDay::Monday, StudyDay::Wednesday, StudyDay::Friday]
    }

    #[test]
    fn valid_three_day_schedule() {
        let blocks: Vec<_> = mwf().into_iter().map(|d| block(d, (9, 0), (10, 0))).collect();
        let v = validate_schedule(&mwf(), &blocks, 30, &ScheduleThresholds::default());
        assert!(v.result.is_valid);
        assert!(v.result.warnings.is_empty(), "{:?}", v.result.warnings);
        assert_eq!(v.weekly_block_minutes, 180);
        assert_eq!(v.schedulable_days, mwf());
    }

    #[test]
    fn empty_selection_is_blocking() {
        let v = validate_schedule(&[], &[], 30, &ScheduleThresholds::default());
        assert!(!v.result.is_valid);
        assert_eq!(v.result.errors.len(), 2);
    }

    #[test]
    fn block_shorter_than_minimum_is_blocking() {
        let days = vec![StudyDay::Tuesday];
        let blocks = vec![block(StudyDay::Tuesday, (18, 0), (18, 20))];
        let v = validate_schedule(&days, &blocks, 30, &ScheduleThresholds::default());
        assert!(!v.result.is_valid);
        assert!(v.result.errors[0].contains("20 min"));
    }

    #[test]
    fn sparse_schedule_warns() {
        let days = vec![StudyDay::Saturday];
        let blocks = vec![block(StudyDay::Saturday, (10, 0), (10, 45))];
        let v = validate_schedule(&days, &blocks, 30, &ScheduleThresholds::default());
        assert!(v.result.is_valid);
        assert!(v.result.warnings.iter().any(|w| w.contains("1 study day")));
        assert!(v.result.warnings.iter().any(|w| w.contains("45 min of study time")));
    }

    #[test]
    fn seven_days_warns_about_rest() {
        let days = StudyDay::ALL.to_vec();
        let blocks: Vec<_> = days.iter().map(|&d| block(d, (7, 0), (8, 0))).collect();
        let v = validate_schedule(&days, &blocks, 30, &ScheduleThresholds::default());
        assert!(v.result.is_valid);
        assert!(v.result.warnings.iter().any(|w| w.contains("no rest day")));
    }

    #[test]
    fn selected_day_without_block_warns() {
        let blocks = vec![
            block(StudyDay::Monday, (9, 0), (10, 0)),
            block(StudyDay::Friday, (9, 0), (10, 0)),
        ];
        let v = validate_schedule(&mwf(), &blocks, 30, &ScheduleThresholds::default());
        assert!(v.result.is_valid);
        assert!(v.result.warnings.iter().any(|w| w.starts_with("wednesday")));
    }

    #[test]
    fn duplicate_block_uses_first() {
        let days = vec![StudyDay::Monday, StudyDay::Tuesday, StudyDay::Thursday];
        let blocks = vec![
            block(StudyDay::Monday, (9, 0), (10, 0)),
            block(StudyDay::Monday, (18, 0), (20, 0)),
            block(StudyDay::Tuesday, (9, 0), (10, 0)),
            block(StudyDay::Thursday, (9, 0), (10, 0)),
        ];
        let v = validate_schedule(&days, &blocks, 30, &ScheduleThresholds::default());
        assert_eq!(v.weekly_block_minutes, 180);
        assert!(v.result.warnings.iter().any(|w| w.contains("only the first")));
    }

    #[test]
    fn inverted_block_is_blocking() {
        let days = vec![StudyDay::Monday];
        let blocks = vec![block(StudyDay::Monday, (10, 0), (9, 0))];
        let v = validate_schedule(&days, &blocks, 30, &ScheduleThresholds::default());
        assert!(!v.result.is_valid);
    }
}
