use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pillarwise", version, about = "Weekly pillar adherence tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Activity log management
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Weekly progress per pillar
    Progress(commands::progress::ProgressArgs),
    /// Current and longest streak
    Streak(commands::streak::StreakArgs),
    /// Streak milestones and seen state
    Milestones(commands::milestones::MilestonesArgs),
    /// The contextual nudge for now
    Nudge(commands::nudge::NudgeArgs),
    /// Coverage per week, newest first
    History(commands::history::HistoryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // stdout carries JSON; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pillarwise_core=warn,pillarwise=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { action } => commands::log::run(action),
        Commands::Progress(args) => commands::progress::run(args),
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Milestones(args) => commands::milestones::run(args),
        Commands::Nudge(args) => commands::nudge::run(args),
        Commands::History(args) => commands::history::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
