use clap::Args;
use pillarwise_core::{Config, Database, Tracker};

use super::{parse_at, print_json};

#[derive(Args)]
pub struct NudgeArgs {
    /// Local time to evaluate at (RFC 3339). Defaults to now
    #[arg(long)]
    at: Option<String>,
}

/// Prints the selected nudge, or `null`.
pub fn run(args: NudgeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let tracker = Tracker::new(&db, &config);

    let now = parse_at(args.at.as_deref())?;
    print_json(&tracker.nudge(now)?)
}
