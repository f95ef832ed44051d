use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RouteArgs {
    /// Path to a JSON plan request
    #[arg(long)]
    pub request: PathBuf,
    /// Print the route report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RouteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = super::load_request(&args.request)?;
    let outcome = super::engine()?.evaluate(&request)?;
    let report = &outcome.route;

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for item in &report.route.items {
        println!(
            "{}. {} [{}] {} min - {}",
            item.position,
            item.title,
            item.level.display_name(),
            item.estimated_minutes,
            item.rationale
        );
    }
    println!(
        "{} course(s), {} min remaining, about {} week(s)",
        report.totals.course_count, report.totals.remaining_minutes, report.totals.estimated_weeks
    );
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for tip in &report.tips {
        println!("tip: {tip}");
    }
    for suggestion in &report.suggestions {
        println!("suggested: {} ({})", suggestion.title, suggestion.reason);
    }
    Ok(())
}
