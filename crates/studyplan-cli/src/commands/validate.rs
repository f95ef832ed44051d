use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a JSON plan request
    #[arg(long)]
    pub request: PathBuf,
    /// Print the reports as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = super::load_request(&args.request)?;
    let outcome = super::engine()?.evaluate(&request)?;

    if args.json {
        let reports = serde_json::json!({
            "blocked": outcome.blocked,
            "timing": outcome.timing,
            "schedule": outcome.schedule,
            "deadline": outcome.deadline,
        });
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        super::print_report("Session bounds", &outcome.timing.result);
        super::print_report("Study days", &outcome.schedule.result);
        if let Some(deadline) = &outcome.deadline {
            super::print_report("Deadlines", &deadline.result);
        }
    }

    if outcome.blocked {
        return Err("request has blocking validation errors".into());
    }
    Ok(())
}
