use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::compliance::check_compliance;
use super::summary::summarize;
use super::{
    GeneratedPlan, PlannedSession, SchedulerFeatures, SessionStatus, Sponsorship, StudyPlanConfig,
};
use crate::calendar::{add_minutes_same_day, StudyDay, TimeBlock};
use crate::lesson_time::{CourseSetAnalysis, LessonTimeEstimate};
use crate::study_mode::{merge_breaks, PomodoroBreakdown, SessionBreakdown, StudyMode};
use crate::validation::{compute_break_schedule, total_break_minutes, BreakScheduleEntry};

/// Days after which a studied lesson is offered again for review.
const REVIEW_INTERVALS_DAYS: [i64; 3] = [1, 3, 7];

/// Generator tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Safety bound on calendar days walked, per selected weekday.
    pub iterations_per_selected_day: u32,
    pub features: SchedulerFeatures,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            iterations_per_selected_day: 365,
            features: SchedulerFeatures::Full,
        }
    }
}

/// One lesson waiting to be scheduled.
#[derive(Debug, Clone)]
pub(crate) struct PendingLesson<'a> {
    pub course_id: &'a str,
    pub course_title: &'a str,
    pub estimate: &'a LessonTimeEstimate,
}

/// Flatten the route into lesson order, skipping completed work.
///
/// For a partially completed course the first `floor(lessons * progress / 100)`
/// lessons are treated as done.
pub(crate) fn pending_lessons<'a>(
    config: &'a StudyPlanConfig,
    analysis: &'a CourseSetAnalysis,
) -> Vec<PendingLesson<'a>> {
    let mut pending = Vec::new();
    for item in &config.route.items {
        if item.is_completed() {
            continue;
        }
        let Some(course) = analysis.course(&item.course_id) else {
            tracing::warn!(course_id = %item.course_id, "route course has no lesson estimates");
            continue;
        };
        let progress = item.progress_percent.clamp(0.0, 100.0);
        let done = (course.lessons.len() as f64 * progress / 100.0).floor() as usize;
        pending.extend(course.lessons.iter().skip(done).map(|estimate| PendingLesson {
            course_id: &course.course_id,
            course_title: &course.title,
            estimate,
        }));
    }
    pending
}

/// Study plan generator.
pub struct PlanGenerator {
    settings: GeneratorSettings,
    breakdown: Box<dyn SessionBreakdown>,
}

impl PlanGenerator {
    /// Create a generator with default settings and pomodoro segmentation.
    pub fn new() -> Self {
        Self::with_settings(GeneratorSettings::default())
    }

    pub fn with_settings(settings: GeneratorSettings) -> Self {
        Self {
            settings,
            breakdown: Box::new(PomodoroBreakdown::default()),
        }
    }

    /// Replace the breakdown used for the pomodoro study mode.
    pub fn with_breakdown(mut self, breakdown: Box<dyn SessionBreakdown>) -> Self {
        self.breakdown = breakdown;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate a plan for `config`, using `analysis` for lesson lengths.
    ///
    /// Never fails: problems that stop generation early are reported in
    /// `GeneratedPlan::warnings`.
    pub fn generate(
        &self,
        config: &StudyPlanConfig,
        analysis: &CourseSetAnalysis,
    ) -> GeneratedPlan {
        let features = self.settings.features;
        let lessons = pending_lessons(config, analysis);
        let mut warnings = Vec::new();

        let selected: BTreeSet<StudyDay> = config.study_days.iter().copied().collect();
        let blocks = usable_blocks(&config.time_blocks);
        let daily_cap = features.is_full().then(|| config.study_mode.daily_cap_minutes());
        let pomodoro = features.is_full() && config.study_mode.mode == StudyMode::Pomodoro;
        let spaced = features.is_full() && config.study_mode.spaced_repetition;
        let min = config.min_session_minutes;
        let max = config.max_session_minutes;

        let iteration_cap = self.settings.iterations_per_selected_day as usize * selected.len();
        let mut sessions: Vec<PlannedSession> = Vec::new();
        let mut studied: Vec<(NaiveDate, String)> = Vec::new();
        let mut overruns = 0usize;
        let mut pointer = 0usize;
        let mut date = config.start_date;
        let mut today = config.start_date;
        let mut minutes_today = 0u32;
        let mut iterations = 0usize;

        if selected.is_empty() {
            warnings.push("No study days selected; nothing was scheduled".to_string());
        } else if !selected.iter().any(|d| blocks.contains_key(d)) {
            warnings.push(
                "None of the selected days has a usable time block; nothing was scheduled"
                    .to_string(),
            );
        }

        while pointer < lessons.len() && iterations < iteration_cap {
            iterations += 1;

            if let Some(end) = config.target_end_date {
                if date > end {
                    warnings.push(format!(
                        "Target end date {end} reached with {} lesson(s) still unscheduled",
                        lessons.len() - pointer
                    ));
                    break;
                }
            }
            if date != today {
                today = date;
                minutes_today = 0;
            }

            let weekday = StudyDay::of(date);
            let block = match blocks.get(&weekday) {
                Some(block) if selected.contains(&weekday) => *block,
                _ => {
                    tracing::debug!(%date, %weekday, "no study on this day");
                    match date.succ_opt() {
                        Some(next) => date = next,
                        None => break,
                    }
                    continue;
                }
            };

            let lesson = &lessons[pointer];
            let study_minutes = lesson.estimate.total_minutes.max(min).min(max);

            if let Some(cap) = daily_cap {
                if study_minutes > cap {
                    warnings.push(format!(
                        "Lesson '{}' needs {study_minutes} min, more than the daily cap \
                         of {cap} min; generation stopped with {} lesson(s) unscheduled",
                        lesson.estimate.title,
                        lessons.len() - pointer
                    ));
                    break;
                }
                if minutes_today + study_minutes > cap {
                    tracing::debug!(%date, minutes_today, cap, "daily cap reached");
                    match date.succ_opt() {
                        Some(next) => date = next,
                        None => break,
                    }
                    continue;
                }
            }

            let breaks = self.breaks_for(study_minutes, config.breaks.enabled, pomodoro);
            let break_minutes = total_break_minutes(&breaks);
            let gross_minutes = study_minutes + break_minutes;

            let Some(end_time) = add_minutes_same_day(block.start, gross_minutes) else {
                if !blocks
                    .iter()
                    .filter(|(day, _)| selected.contains(*day))
                    .any(|(_, b)| add_minutes_same_day(b.start, gross_minutes).is_some())
                {
                    warnings.push(format!(
                        "Lesson '{}' ({gross_minutes} min with breaks) cannot finish \
                         before midnight in any time block; generation stopped",
                        lesson.estimate.title
                    ));
                    break;
                }
                tracing::debug!(%date, gross_minutes, "session would cross midnight");
                match date.succ_opt() {
                    Some(next) => date = next,
                    None => break,
                }
                continue;
            };

            if gross_minutes > block.duration_minutes() {
                overruns += 1;
            }

            let review_lesson_ids = if spaced {
                review_lessons(&studied, date)
            } else {
                Vec::new()
            };

            sessions.push(PlannedSession {
                id: uuid::Uuid::new_v4().to_string(),
                date,
                weekday,
                start_time: block.start,
                end_time,
                duration_minutes: study_minutes,
                break_minutes,
                gross_minutes,
                course_id: lesson.course_id.to_string(),
                course_title: lesson.course_title.to_string(),
                lesson_id: lesson.estimate.lesson_id.clone(),
                lesson_title: lesson.estimate.title.clone(),
                module_id: lesson.estimate.module_id.clone(),
                breaks,
                review_lesson_ids,
                status: SessionStatus::Planned,
            });
            studied.push((date, lesson.estimate.lesson_id.clone()));
            minutes_today += study_minutes;
            pointer += 1;

            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        if pointer < lessons.len() && iterations >= iteration_cap && iteration_cap > 0 {
            warnings.push(format!(
                "Stopped after walking {iteration_cap} calendar days with {} lesson(s) unscheduled",
                lessons.len() - pointer
            ));
        }
        if overruns > 0 {
            warnings.push(format!(
                "{overruns} session(s) run past the end of their time block \
                 once breaks are included"
            ));
        }
        if sessions.is_empty() {
            warnings.push("The plan contains no sessions".to_string());
        }

        let summary = summarize(config.start_date, &sessions);
        let deadline_report = (features.is_full()
            && config.sponsorship == Sponsorship::Organization
            && !config.deadlines.is_empty())
        .then(|| check_compliance(&config.deadlines, &lessons, &sessions));

        let breakdown = if pomodoro { self.breakdown.name() } else { "tiered" };
        tracing::info!(
            breakdown,
            sessions = summary.total_sessions,
            study_minutes = summary.total_study_minutes,
            warnings = warnings.len(),
            "generated study plan"
        );

        GeneratedPlan {
            id: uuid::Uuid::new_v4().to_string(),
            features,
            config: config.clone(),
            sessions,
            summary,
            warnings,
            deadline_report,
        }
    }

    fn breaks_for(
        &self,
        study_minutes: u32,
        enabled: bool,
        pomodoro: bool,
    ) -> Vec<BreakScheduleEntry> {
        if !enabled {
            return Vec::new();
        }
        let tiered = compute_break_schedule(study_minutes);
        if pomodoro {
            merge_breaks(tiered, self.breakdown.intra_session_breaks(study_minutes))
        } else {
            tiered
        }
    }
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// First well-formed block per weekday.
fn usable_blocks(blocks: &[TimeBlock]) -> BTreeMap<StudyDay, &TimeBlock> {
    let mut usable = BTreeMap::new();
    for block in blocks {
        if usable.contains_key(&block.day) {
            continue;
        }
        if block.is_inverted() {
            usable.insert(block.day, None);
        } else {
            usable.insert(block.day, Some(block));
        }
    }
    usable
        .into_iter()
        .filter_map(|(day, block)| block.map(|b| (day, b)))
        .collect()
}

fn review_lessons(studied: &[(NaiveDate, String)], date: NaiveDate) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for (day, lesson_id) in studied {
        let age = (date - *day).num_days();
        if REVIEW_INTERVALS_DAYS.contains(&age) && !ids.contains(lesson_id) {
            ids.push(lesson_id.clone());
        }
    }
    ids
}
