use clap::Args;
use pillarwise_core::{Config, Database, Tracker};

use super::{parse_at, print_json};

#[derive(Args)]
pub struct HistoryArgs {
    /// Number of weeks, including the current one (1 to 520)
    #[arg(long, default_value = "8")]
    weeks: usize,
    /// Reference time (RFC 3339). Defaults to now
    #[arg(long)]
    at: Option<String>,
}

pub fn run(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let tracker = Tracker::new(&db, &config);

    let today = parse_at(args.at.as_deref())?.date_naive();
    print_json(&tracker.trend(today, args.weeks)?)
}
