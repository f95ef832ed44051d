use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON plan request
    #[arg(long)]
    pub request: PathBuf,
    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = super::load_request(&args.request)?;
    let outcome = super::engine()?.plan(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let Some(plan) = &outcome.plan else {
        if !args.json {
            for error in outcome.blocking_errors() {
                eprintln!("  {error}");
            }
        }
        return Err(format!(
            "plan generation blocked by {} validation error(s)",
            outcome.blocking_errors().len()
        )
        .into());
    };

    if args.json {
        return Ok(());
    }

    if plan.is_empty() {
        println!("No sessions planned");
    }
    for session in &plan.sessions {
        println!(
            "{} {:<9} {}-{}  {:>3} min + {:>2} min breaks  {} / {}",
            session.date,
            session.weekday,
            session.start_time.format("%H:%M"),
            session.end_time.format("%H:%M"),
            session.duration_minutes,
            session.break_minutes,
            session.course_title,
            session.lesson_title,
        );
    }

    let summary = &plan.summary;
    println!();
    println!("Sessions:    {}", summary.total_sessions);
    println!("Study time:  {} min", summary.total_study_minutes);
    println!("Break time:  {} min", summary.total_break_minutes);
    println!("Per week:    {:.1}", summary.sessions_per_week);
    if let Some(done) = summary.estimated_completion_date {
        println!("Completion:  {done} ({} week(s))", summary.estimated_weeks);
    }
    if let Some(report) = &plan.deadline_report {
        for a in &report.assignments {
            let status = match a.margin_days {
                Some(margin) => format!("margin {margin} day(s)"),
                None => "not fully scheduled".to_string(),
            };
            println!("Deadline:    {} due {} ({status})", a.course_id, a.due_date);
        }
    }
    for warning in &plan.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}
