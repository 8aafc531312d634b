use clap::Args;
use pillarwise_core::{Config, Database, MilestoneReport, Tracker};
use serde::Serialize;

use super::{parse_at, print_json};

#[derive(Args)]
pub struct MilestonesArgs {
    /// Reference time (RFC 3339). Defaults to now
    #[arg(long)]
    at: Option<String>,
    /// Record the unseen milestone as shown
    #[arg(long)]
    mark_seen: bool,
}

#[derive(Serialize)]
struct MilestonesOutput {
    #[serde(flatten)]
    report: MilestoneReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    marked: Option<String>,
}

pub fn run(args: MilestonesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let tracker = Tracker::new(&db, &config);

    let today = parse_at(args.at.as_deref())?.date_naive();
    let report = tracker.milestones(today)?;

    let marked = match (&report.unseen, args.mark_seen) {
        (Some(milestone), true) => {
            if !tracker.acknowledge_milestone(&milestone.id) {
                return Err(format!("could not record milestone {}", milestone.id).into());
            }
            Some(milestone.id.clone())
        }
        _ => None,
    };

    print_json(&MilestonesOutput { report, marked })
}
