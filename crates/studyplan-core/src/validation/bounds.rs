//! Session length bound validation.

use serde::{Deserialize, Serialize};

use super::ValidationResult;
use crate::lesson_time::CourseSetAnalysis;

/// Advisory thresholds for session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingThresholds {
    /// Sessions shorter than this trigger a warning.
    pub short_session_minutes: u32,
    /// Sessions longer than this trigger a warning.
    pub long_session_minutes: u32,
}

impl Default for TimingThresholds {
    fn default() -> Self {
        Self {
            short_session_minutes: 15,
            long_session_minutes: 180,
        }
    }
}

/// Result of checking the learner's min/max session minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTimingValidation {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub min_session_minutes: u32,
    pub max_session_minutes: u32,
    pub recommended_min_session_minutes: u32,
    pub average_lesson_minutes: f64,
    /// Session length matching the average lesson, rounded up to 5 minutes.
    pub suggested_session_minutes: Option<u32>,
}

/// Check proposed bounds against the course set.
pub fn validate_session_bounds(
    min_session_minutes: u32,
    max_session_minutes: u32,
    analysis: &CourseSetAnalysis,
    thresholds: &TimingThresholds,
) -> SessionTimingValidation {
    let mut result = ValidationResult::new();
    let recommended = analysis.recommended_min_session_minutes;

    if min_session_minutes == 0 {
        result.error("Minimum session length must be greater than zero");
    }
    if min_session_minutes < recommended {
        result.error(format!(
            "Minimum session length of {min_session_minutes} min is shorter than the longest \
             lesson ({recommended} min); \
             sessions must be at least {recommended} min so every lesson fits in one session"
        ));
    }
    if max_session_minutes < min_session_minutes {
        result.error(format!(
            "Maximum session length ({max_session_minutes} min) is below the minimum \
             ({min_session_minutes} min)"
        ));
    }

    if min_session_minutes > 0 && min_session_minutes < thresholds.short_session_minutes {
        result.warn(format!(
            "Sessions under {} min are very short and leave little room for focused study",
            thresholds.short_session_minutes
        ));
    }
    if max_session_minutes > thresholds.long_session_minutes {
        result.warn(format!(
            "Sessions over {} min are very long; concentration usually drops well before that",
            thresholds.long_session_minutes
        ));
    }

    let suggested_session_minutes = if analysis.total_lessons > 0 {
        let suggested = round_up_to_five(analysis.average_lesson_minutes);
        result.suggest(format!(
            "Your lessons average {:.0} min; sessions of about {suggested} min fit them well",
            analysis.average_lesson_minutes
        ));
        Some(suggested)
    } else {
        None
    };

    SessionTimingValidation {
        result,
        min_session_minutes,
        max_session_minutes,
        recommended_min_session_minutes: recommended,
        average_lesson_minutes: analysis.average_lesson_minutes,
        suggested_session_minutes,
    }
}

fn round_up_to_five(minutes: f64) -> u32 {
    let whole = minutes.ceil().max(0.0) as u32;
    whole.div_ceil(5) * 5
}
