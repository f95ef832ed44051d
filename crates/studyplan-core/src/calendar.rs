//! Weekday and time-block primitives shared by validation and planning.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A day of the week a learner can select for study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl StudyDay {
    pub const ALL: [StudyDay; 7] = [
        StudyDay::Monday,
        StudyDay::Tuesday,
        StudyDay::Wednesday,
        StudyDay::Thursday,
        StudyDay::Friday,
        StudyDay::Saturday,
        StudyDay::Sunday,
    ];

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    pub fn name(&self) -> &'static str {
        match self {
            StudyDay::Monday => "monday",
            StudyDay::Tuesday => "tuesday",
            StudyDay::Wednesday => "wednesday",
            StudyDay::Thursday => "thursday",
            StudyDay::Friday => "friday",
            StudyDay::Saturday => "saturday",
            StudyDay::Sunday => "sunday",
        }
    }
}

impl From<Weekday> for StudyDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => StudyDay::Monday,
            Weekday::Tue => StudyDay::Tuesday,
            Weekday::Wed => StudyDay::Wednesday,
            Weekday::Thu => StudyDay::Thursday,
            Weekday::Fri => StudyDay::Friday,
            Weekday::Sat => StudyDay::Saturday,
            Weekday::Sun => StudyDay::Sunday,
        }
    }
}

impl std::fmt::Display for StudyDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A recurring study window on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub day: StudyDay,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeBlock {
    pub fn new(day: StudyDay, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Length of the block in minutes; zero when the block is inverted.
    pub fn duration_minutes(&self) -> u32 {
        if self.end <= self.start {
            return 0;
        }
        (self.end - self.start).num_minutes() as u32
    }

    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }
}

/// Minutes since midnight for a time of day.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Add minutes to a time of day without wrapping. `None` when the result
/// would fall on the next calendar date.
pub fn add_minutes_same_day(time: NaiveTime, minutes: u32) -> Option<NaiveTime> {
    let total = minutes_of_day(time) + minutes;
    if total >= 24 * 60 {
        return None;
    }
    NaiveTime::from_hms_opt(total / 60, total % 60, 0)
}

/// Serde adapter for `HH:MM` time-of-day strings (seconds accepted on input).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid time '{raw}', expected HH:MM"))
        })
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
            .ok()
    }
}
