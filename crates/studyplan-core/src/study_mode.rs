//! Study modes and intra-session break segmentation.
//!
//! A study mode can add breaks on top of the tiered break schedule. The extra
//! break time lengthens the session on the clock but never changes how many
//! minutes of study it contains.

use serde::{Deserialize, Serialize};

use crate::validation::BreakScheduleEntry;

/// How a learner wants sessions segmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Tiered breaks only.
    #[default]
    Standard,
    /// Tiered breaks plus a short break after every focus block.
    Pomodoro,
}

/// Per-session breakdown service consulted by the plan generator.
pub trait SessionBreakdown {
    /// Short identifier for logs and plan metadata.
    fn name(&self) -> &str;

    /// Breaks this mode adds to a session of `study_minutes`.
    fn intra_session_breaks(&self, study_minutes: u32) -> Vec<BreakScheduleEntry>;
}

/// Pomodoro-style segmentation: a break after each full focus block that
/// still has study left after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroBreakdown {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for PomodoroBreakdown {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl SessionBreakdown for PomodoroBreakdown {
    fn name(&self) -> &str {
        "pomodoro"
    }

    fn intra_session_breaks(&self, study_minutes: u32) -> Vec<BreakScheduleEntry> {
        if self.focus_minutes == 0 || self.break_minutes == 0 {
            return Vec::new();
        }
        (1..)
            .map(|n| n * self.focus_minutes)
            .take_while(|&offset| offset < study_minutes)
            .map(|offset| BreakScheduleEntry {
                session_minutes: study_minutes,
                offset_minutes: offset,
                duration_minutes: self.break_minutes,
            })
            .collect()
    }
}

/// Combine tiered breaks with mode breaks. Tiered breaks win when both land on
/// the same offset; the result is ordered by offset.
pub fn merge_breaks(
    tiered: Vec<BreakScheduleEntry>,
    extra: Vec<BreakScheduleEntry>,
) -> Vec<BreakScheduleEntry> {
    let mut merged = tiered;
    for entry in extra {
        if !merged.iter().any(|b| b.offset_minutes == entry.offset_minutes) {
            merged.push(entry);
        }
    }
    merged.sort_by_key(|b| b.offset_minutes);
    merged
}
