use clap::Args;
use studyplan_core::study_mode::merge_breaks;
use studyplan_core::validation::total_break_minutes;
use studyplan_core::{compute_break_schedule, EngineConfig, SessionBreakdown};

#[derive(Args)]
pub struct BreaksArgs {
    /// Study minutes in the session (at most one day)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub minutes: u32,
    /// Add pomodoro segmentation on top of the tiered breaks
    #[arg(long)]
    pub pomodoro: bool,
    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BreaksArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut breaks = compute_break_schedule(args.minutes);
    if args.pomodoro {
        let breakdown = EngineConfig::load()?.pomodoro_breakdown();
        breaks = merge_breaks(breaks, breakdown.intra_session_breaks(args.minutes));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breaks)?);
        return Ok(());
    }

    for entry in &breaks {
        println!("after {:>3} min: {} min break", entry.offset_minutes, entry.duration_minutes);
    }
    let total = total_break_minutes(&breaks);
    println!(
        "total: {} min study + {total} min breaks = {} min",
        args.minutes,
        args.minutes + total
    );
    Ok(())
}
