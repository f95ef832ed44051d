//! Integration tests for configuration files and external availability tables.

use indoc::indoc;
use std::io::Write;

use studyplan_core::availability::RoleLevel;
use studyplan_core::{AvailabilityEstimator, EngineConfig, PlanningEngine, ProfessionalProfile};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "config.toml",
        indoc! {r#"
            [route]
            weekly_study_hours = 5.0

            [pomodoro]
            focus_minutes = 50
        "#},
    );

    let cfg = EngineConfig::load_from(&path).unwrap();
    assert_eq!(cfg.route.weekly_study_hours, 5.0);
    assert_eq!(cfg.route.max_suggestions, 3);
    assert_eq!(cfg.pomodoro.focus_minutes, 50);
    assert_eq!(cfg.pomodoro.break_minutes, 5);
    assert_eq!(cfg.validation.long_session_minutes, 180);
}

#[test]
fn test_save_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = EngineConfig::default();
    cfg.update("generation.iterations_per_selected_day", "52").unwrap();
    cfg.update("lessons.interaction_overhead_minutes", "5").unwrap();
    cfg.save_to(&path).unwrap();

    let reloaded = EngineConfig::load_from(&path).unwrap();
    assert_eq!(reloaded, cfg);
    assert_eq!(reloaded.generation.iterations_per_selected_day, 52);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "config.toml", "[route\nweekly_study_hours = ");
    let err = EngineConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to load"));
}

#[test]
fn test_external_availability_tables() {
    let dir = tempfile::tempdir().unwrap();
    let tables = write_file(
        &dir,
        "tables.toml",
        indoc! {r#"
            areas = []

            [[levels]]
            level = "junior"
            keywords = ["apprentice"]
            daily_min_minutes = 60.0
            daily_max_minutes = 120.0
            weekly_min_hours = 5.0
            weekly_max_hours = 10.0
            session_category = "long"

            [[levels]]
            level = "professional"
            keywords = []
            daily_min_minutes = 30.0
            daily_max_minutes = 60.0
            weekly_min_hours = 3.0
            weekly_max_hours = 6.0
            session_category = "medium"

            [[company_sizes]]
            label = "micro"
            max_headcount = 10
            multiplier = 1.0

            [[company_sizes]]
            label = "small"
            max_headcount = 50
            multiplier = 1.0

            [[company_sizes]]
            label = "medium"
            max_headcount = 250
            multiplier = 1.0

            [[company_sizes]]
            label = "large"
            max_headcount = 1000
            multiplier = 1.0

            [[company_sizes]]
            label = "enterprise"
            multiplier = 0.5
        "#},
    );

    let mut cfg = EngineConfig::default();
    cfg.availability_tables = Some(tables);
    let engine = PlanningEngine::from_config(cfg).unwrap();

    let profile = ProfessionalProfile {
        role_title: Some("Electrical Apprentice".to_string()),
        company_headcount: Some(20_000),
        ..Default::default()
    };
    let estimate = AvailabilityEstimator::new(engine.tables()).estimate(&profile);
    assert_eq!(estimate.role_level, RoleLevel::Junior);
    assert_eq!(estimate.daily_max_minutes, 60);
    assert_eq!(estimate.weekly_max_hours, 5.0);
}

#[test]
fn test_invalid_external_tables_fail_engine_construction() {
    let dir = tempfile::tempdir().unwrap();
    let tables = write_file(
        &dir,
        "tables.toml",
        indoc! {r#"
            levels = []
            company_sizes = []
            areas = []
        "#},
    );
    let mut cfg = EngineConfig::default();
    cfg.availability_tables = Some(tables);
    assert!(PlanningEngine::from_config(cfg).is_err());
}
