//! Pre-generation checks and break-schedule computation.
//!
//! Every check returns data. Blocking problems go to `errors`, advisory ones to
//! `warnings`, and actionable hints to `suggestions`; nothing here panics or
//! returns `Err` for a business-rule violation.

mod bounds;
mod breaks;
mod days;
mod deadline;

pub use bounds::{validate_session_bounds, SessionTimingValidation, TimingThresholds};
pub use breaks::{compute_break_schedule, total_break_minutes, BreakScheduleEntry};
pub use days::{validate_schedule, ScheduleThresholds, ScheduleValidation};
pub use deadline::{validate_deadlines, CourseAssignment, DeadlineValidation};

use serde::{Deserialize, Serialize};

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn suggest(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.warn("few days");
        result.suggest("add a day");
        assert!(result.is_valid);
    }

    #[test]
    fn error_invalidates() {
        let mut result = ValidationResult::new();
        result.error("no days");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["no days"]);
    }
}
