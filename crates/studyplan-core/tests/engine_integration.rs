//! Integration tests for the planning engine pipeline.

use chrono::{NaiveDate, NaiveTime};

use studyplan_core::catalog::ContentKind;
use studyplan_core::planner::{SchedulerFeatures, Sponsorship, StudyModeConfig};
use studyplan_core::{
    AvailabilityTables, Course, DifficultyLevel, EngineConfig, LearnerCourse, Lesson,
    LessonContent, PlanRequest, PlanningEngine, ProfessionalProfile, SchedulingPreferences,
    StudyDay, StudyMode, TimeBlock,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn course(id: &str, level: DifficultyLevel, lesson_minutes: &[u32]) -> Course {
    Course {
        id: id.to_string(),
        title: id.to_uppercase(),
        category: "Analytics".to_string(),
        level,
        lessons: lesson_minutes
            .iter()
            .enumerate()
            .map(|(i, &minutes)| Lesson {
                id: format!("{id}-{i}"),
                module_id: String::new(),
                title: format!("Lesson {i}"),
                contents: vec![LessonContent {
                    kind: ContentKind::Video,
                    minutes,
                }],
            })
            .collect(),
    }
}

fn learner(
    id: &str,
    level: DifficultyLevel,
    progress: f64,
    due: Option<NaiveDate>,
) -> LearnerCourse {
    LearnerCourse {
        course_id: id.to_string(),
        title: id.to_uppercase(),
        category: "Analytics".to_string(),
        level,
        progress_percent: progress,
        owned: due.is_none(),
        due_date: due,
    }
}

fn request() -> PlanRequest {
    let days = vec![StudyDay::Tuesday, StudyDay::Thursday, StudyDay::Saturday];
    PlanRequest {
        learner_id: "learner-7".to_string(),
        profile: ProfessionalProfile {
            role_title: Some("Operations Manager".to_string()),
            seniority: None,
            functional_area: Some("Logistics".to_string()),
            company_headcount: Some(120),
        },
        sponsorship: Sponsorship::Independent,
        catalog: vec![
            course("intro", DifficultyLevel::Beginner, &[27, 27, 27, 27]),
            course("deep", DifficultyLevel::Advanced, &[42, 42]),
            course("middle", DifficultyLevel::Intermediate, &[20]),
        ],
        courses: vec![
            learner("deep", DifficultyLevel::Advanced, 0.0, None),
            learner("intro", DifficultyLevel::Beginner, 50.0, None),
        ],
        preferences: SchedulingPreferences {
            time_blocks: days.iter().map(|&d| TimeBlock::new(d, t(19, 0), t(20, 30))).collect(),
            study_days: days,
            min_session_minutes: 45,
            max_session_minutes: 60,
            breaks: Default::default(),
            study_mode: None,
            target_end_date: None,
            features: SchedulerFeatures::Full,
        },
        start_date: date(2026, 2, 2),
        today: None,
    }
}

fn engine() -> PlanningEngine {
    PlanningEngine::new(EngineConfig::default(), AvailabilityTables::default())
}

#[test]
fn test_pipeline_generates_plan_in_route_order() {
    let outcome = engine().plan(&request()).unwrap();
    assert!(!outcome.blocked, "{:?}", outcome.blocking_errors());

    let route: Vec<&str> = outcome
        .route
        .route
        .items
        .iter()
        .map(|i| i.course_id.as_str())
        .collect();
    assert_eq!(route, vec!["intro", "deep"]);
    assert!(outcome.route.suggestions.iter().any(|s| s.course_id == "middle"));

    let plan = outcome.plan.expect("plan generated");
    let lessons: Vec<&str> = plan.sessions.iter().map(|s| s.lesson_id.as_str()).collect();
    // half of intro is done
    assert_eq!(lessons, vec!["intro-2", "intro-3", "deep-0", "deep-1"]);
    assert_eq!(plan.sessions[0].date, date(2026, 2, 3));
    assert!(plan.sessions.iter().all(|s| s.duration_minutes >= 45 && s.duration_minutes <= 60));
    assert!(plan.deadline_report.is_none());
    assert_eq!(outcome.availability.role_level.display_name(), "management");
}

#[test]
fn test_blocking_errors_refuse_generation() {
    let mut req = request();
    req.preferences.min_session_minutes = 30;
    req.preferences.study_days.clear();

    let outcome = engine().plan(&req).unwrap();
    assert!(outcome.blocked);
    assert!(outcome.plan.is_none());
    let errors = outcome.blocking_errors();
    assert!(errors.iter().any(|e| e.contains("longest lesson")));
    assert!(errors.iter().any(|e| e.contains("study day")));
}

#[test]
fn test_organization_deadlines_checked_and_reported() {
    let mut req = request();
    req.sponsorship = Sponsorship::Organization;
    req.courses[0].due_date = Some(date(2026, 3, 31));
    req.courses[0].owned = false;

    let outcome = engine().plan(&req).unwrap();
    let deadline = outcome.deadline.as_ref().expect("deadline validation");
    assert!(deadline.feasible);
    assert_eq!(deadline.nearest_course_id.as_deref(), Some("deep"));

    let plan = outcome.plan.expect("plan generated");
    let report = plan.deadline_report.expect("compliance report");
    assert!(report.feasible);
    assert_eq!(report.assignments[0].course_id, "deep");
    assert!(report.assignments[0].margin_days.unwrap() > 0);
}

#[test]
fn test_expired_deadline_blocks_but_slow_pace_does_not() {
    let mut req = request();
    req.sponsorship = Sponsorship::Organization;
    req.courses[0].due_date = Some(date(2026, 2, 1));
    let outcome = engine().plan(&req).unwrap();
    assert!(outcome.blocked);

    let mut req = request();
    req.sponsorship = Sponsorship::Organization;
    req.courses[0].due_date = Some(date(2026, 2, 5));
    let outcome = engine().plan(&req).unwrap();
    let deadline = outcome.deadline.as_ref().unwrap();
    assert!(!deadline.feasible);
    assert!(!outcome.blocked);
    let report = outcome.plan.unwrap().deadline_report.unwrap();
    assert!(!report.feasible);
}

#[test]
fn test_only_expired_deadlines_are_blocking_errors() {
    let mut req = request();
    req.sponsorship = Sponsorship::Organization;
    req.courses[0].due_date = Some(date(2026, 2, 5));
    req.courses[1].due_date = Some(date(2026, 2, 1));

    let outcome = engine().plan(&req).unwrap();
    assert!(outcome.blocked);
    let deadline = outcome.deadline.as_ref().unwrap();
    assert_eq!(deadline.result.errors.len(), 2);

    let blocking = outcome.blocking_errors();
    assert_eq!(blocking.len(), 1);
    assert!(blocking[0].contains("already passed"));
    assert!(!blocking.iter().any(|e| e.contains("min/week")));
}

#[test]
fn test_pomodoro_mode_from_request() {
    let mut req = request();
    req.preferences.study_mode = Some(StudyModeConfig {
        mode: StudyMode::Pomodoro,
        max_consecutive_hours: 2.0,
        spaced_repetition: false,
    });
    let plan = engine().plan(&req).unwrap().plan.unwrap();
    // 45 min: tiered break at 22 plus pomodoro break at 25
    let first = &plan.sessions[0];
    assert_eq!(first.duration_minutes, 45);
    assert_eq!(first.break_minutes, 15);
}

#[test]
fn test_request_parses_from_json() {
    let raw = serde_json::to_string(&request()).unwrap();
    let parsed = PlanRequest::from_json(&raw).unwrap();
    assert_eq!(parsed.learner_id, "learner-7");
    assert!(PlanRequest::from_json("{").is_err());
}

#[test]
fn test_duplicate_catalog_entries_are_an_error() {
    let mut req = request();
    req.catalog.push(course("intro", DifficultyLevel::Beginner, &[5]));
    assert!(engine().evaluate(&req).is_err());
}
