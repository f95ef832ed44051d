pub mod availability;
pub mod breaks;
pub mod config;
pub mod plan;
pub mod route;
pub mod validate;

use std::path::Path;

use studyplan_core::{EngineConfig, PlanRequest, PlanningEngine, ValidationResult};

/// Read and parse a JSON request file.
pub(crate) fn load_request(path: &Path) -> Result<PlanRequest, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read request {}: {e}", path.display()))?;
    let request = PlanRequest::from_json(&raw)?;
    tracing::debug!(path = %path.display(), courses = request.courses.len(), "loaded request");
    Ok(request)
}

/// Engine built from the user's configuration.
pub(crate) fn engine() -> Result<PlanningEngine, Box<dyn std::error::Error>> {
    let config = EngineConfig::load()?;
    Ok(PlanningEngine::from_config(config)?)
}

/// Print a validation report under a heading.
pub(crate) fn print_report(title: &str, result: &ValidationResult) {
    let status = if result.is_valid { "ok" } else { "FAILED" };
    println!("{title}: {status}");
    for error in &result.errors {
        println!("  error: {error}");
    }
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    for suggestion in &result.suggestions {
        println!("  hint: {suggestion}");
    }
}
