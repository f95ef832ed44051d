use clap::Args;
use studyplan_core::{AvailabilityEstimator, ProfessionalProfile};

#[derive(Args)]
pub struct AvailabilityArgs {
    /// Role or job title
    #[arg(long)]
    pub role: Option<String>,
    /// Seniority label
    #[arg(long)]
    pub level: Option<String>,
    /// Functional area or industry
    #[arg(long)]
    pub area: Option<String>,
    /// Employer headcount
    #[arg(long)]
    pub headcount: Option<u32>,
    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AvailabilityArgs) -> Result<(), Box<dyn std::error::Error>> {
    let profile = ProfessionalProfile {
        role_title: args.role,
        seniority: args.level,
        functional_area: args.area,
        company_headcount: args.headcount,
    };
    let engine = super::engine()?;
    let estimate = AvailabilityEstimator::new(engine.tables()).estimate(&profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!("Level:   {}", estimate.role_level.display_name());
    println!(
        "Daily:   {}-{} min",
        estimate.daily_min_minutes, estimate.daily_max_minutes
    );
    println!(
        "Weekly:  {:.1}-{:.1} h",
        estimate.weekly_min_hours, estimate.weekly_max_hours
    );
    println!("Factor:  x{:.2}", estimate.multipliers.combined);
    println!();
    println!("{}", estimate.rationale);
    Ok(())
}
