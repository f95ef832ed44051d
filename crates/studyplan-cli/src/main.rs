use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Study plan generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a request and generate its study plan
    Plan(commands::plan::PlanArgs),
    /// Run the pre-generation checks only
    Validate(commands::validate::ValidateArgs),
    /// Show the learning route for a request
    Route(commands::route::RouteArgs),
    /// Show the break schedule for a session length
    Breaks(commands::breaks::BreaksArgs),
    /// Estimate study availability from profile signals
    Availability(commands::availability::AvailabilityArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Structured logs go to stderr so stdout stays parseable.
fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("STUDYPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Route(args) => commands::route::run(args),
        Commands::Breaks(args) => commands::breaks::run(args),
        Commands::Availability(args) => commands::availability::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
