//! Tiered rest-break schedule for a study session.
//!
//! Offsets count study minutes from the start of the session. A break at
//! offset `n` is taken after `n` minutes of study; the wall-clock length of
//! the session is the study time plus every break.

use serde::{Deserialize, Serialize};

/// One rest break inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakScheduleEntry {
    /// Study length of the session this entry belongs to.
    pub session_minutes: u32,
    /// Study minutes elapsed when the break starts.
    pub offset_minutes: u32,
    pub duration_minutes: u32,
}

// Upper bounds of each tier, in study minutes.
const SHORT_TIER_MAX: u32 = 35;
const MEDIUM_TIER_MAX: u32 = 60;
const LONG_TIER_MAX: u32 = 90;

const SHORT_BREAK: u32 = 5;
const MEDIUM_BREAK: u32 = 10;
const LONG_BREAK: u32 = 15;
const LONG_INTERVAL: u32 = 30;
const EXTENDED_BREAK: u32 = 20;
const EXTENDED_INTERVAL: u32 = 45;

/// Compute the break schedule for a session of `session_minutes` of study.
///
/// - up to 35 min: one 5-minute break at the end
/// - up to 60 min: one 10-minute break at the midpoint
/// - up to 90 min: a 15-minute break every 30 minutes of study
/// - longer: a 20-minute break every 45 minutes of study
pub fn compute_break_schedule(session_minutes: u32) -> Vec<BreakScheduleEntry> {
    let entry = |offset_minutes: u32, duration_minutes: u32| BreakScheduleEntry {
        session_minutes,
        offset_minutes,
        duration_minutes,
    };

    match session_minutes {
        0 => Vec::new(),
        m if m <= SHORT_TIER_MAX => vec![entry(m, SHORT_BREAK)],
        m if m <= MEDIUM_TIER_MAX => vec![entry(m / 2, MEDIUM_BREAK)],
        m if m <= LONG_TIER_MAX => repeating(m, LONG_INTERVAL, LONG_BREAK),
        m => repeating(m, EXTENDED_INTERVAL, EXTENDED_BREAK),
    }
}

fn repeating(
    session_minutes: u32,
    interval: u32,
    duration_minutes: u32,
) -> Vec<BreakScheduleEntry> {
    (1..=session_minutes / interval)
        .map(|n| BreakScheduleEntry {
            session_minutes,
            offset_minutes: n * interval,
            duration_minutes,
        })
        .collect()
}

/// Sum of break minutes in a schedule.
pub fn total_break_minutes(entries: &[BreakScheduleEntry]) -> u32 {
    entries.iter().map(|b| b.duration_minutes).sum()
}
