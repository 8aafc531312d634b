//! Activity log commands for CLI.

use chrono::Local;
use clap::Subcommand;
use pillarwise_core::{week_start, Config, Database, NewActivityLog, Pillar, Tracker};
use uuid::Uuid;

use super::{parse_at, parse_date, print_json};

#[derive(Subcommand)]
pub enum LogAction {
    /// Record an activity
    Add {
        /// Pillar: cardio, strength, sleep, clean_eating or mindfulness
        pillar: String,
        /// Amount in the pillar's unit (minutes, sessions, hours, days)
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// When it happened (RFC 3339). Defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Book into the week starting on this Monday (YYYY-MM-DD)
        #[arg(long)]
        week: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List entries for a week
    List {
        /// Any date in the week (YYYY-MM-DD). Defaults to this week
        #[arg(long)]
        week: Option<String>,
    },
    /// Change an entry's value
    Edit {
        /// Entry ID
        id: String,
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut tracker = Tracker::new(&db, &config);

    match action {
        LogAction::Add {
            pillar,
            value,
            at,
            week,
            note,
        } => {
            let pillar: Pillar = pillar.parse()?;
            let now = parse_at(at.as_deref())?;
            let mut input =
                NewActivityLog::new(config.tracking.user_id.clone(), pillar, value, now);
            if let Some(week) = week {
                input = input.for_week(parse_date(&week)?);
            }
            if let Some(note) = note {
                input = input.with_note(note);
            }
            // the active week follows the clock; --at only stamps the entry
            let outcome = tracker.record(input, Local::now().date_naive())?;
            print_json(&outcome)?;
        }
        LogAction::List { week } => {
            let week = match week {
                Some(raw) => week_start(parse_date(&raw)?),
                None => week_start(parse_at(None)?.date_naive()),
            };
            print_json(&tracker.entries(week)?)?;
        }
        LogAction::Edit { id, value } => {
            let id = Uuid::parse_str(&id)?;
            let updated = tracker.edit(&id, value)?;
            print_json(&updated)?;
        }
        LogAction::Delete { id } => {
            let id = Uuid::parse_str(&id)?;
            if !tracker.delete(&id)? {
                return Err(format!("no entry with id {id}").into());
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}
