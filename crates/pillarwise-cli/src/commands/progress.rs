use clap::Args;
use pillarwise_core::{Config, Database, Tracker};

use super::{parse_at, parse_date, print_json};

#[derive(Args)]
pub struct ProgressArgs {
    /// Any date in the week (YYYY-MM-DD). Defaults to this week
    #[arg(long)]
    week: Option<String>,
}

pub fn run(args: ProgressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let tracker = Tracker::new(&db, &config);

    let week = match args.week {
        Some(raw) => parse_date(&raw)?,
        None => parse_at(None)?.date_naive(),
    };
    print_json(&tracker.summary(week)?)
}
