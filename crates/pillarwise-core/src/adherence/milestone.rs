//! Streak milestones.
//!
//! Each milestone is announced at most once. Resolution always surfaces the
//! most advanced unseen milestone the streak has reached. Announcing a
//! milestone supersedes every lower one: once `streak_4` is seen, `streak_1`
//! and `streak_2` are never offered afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A one-time achievement tied to a streak length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub streak_threshold: u32,
    pub text: String,
    pub subtext: String,
}

impl Milestone {
    pub fn new(
        id: impl Into<String>,
        streak_threshold: u32,
        text: impl Into<String>,
        subtext: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            streak_threshold,
            text: text.into(),
            subtext: subtext.into(),
        }
    }
}

/// Built-in milestone catalog, ordered by threshold.
pub fn default_catalog() -> Vec<Milestone> {
    vec![
        Milestone::new(
            "streak_1",
            1,
            "First strong week",
            "Four or more pillars met. That's the foundation.",
        ),
        Milestone::new(
            "streak_2",
            2,
            "Back to back",
            "Two strong weeks in a row.",
        ),
        Milestone::new(
            "streak_4",
            4,
            "One month strong",
            "Four consecutive weeks hitting your pillars.",
        ),
        Milestone::new(
            "streak_8",
            8,
            "Two months of momentum",
            "Eight weeks. This is becoming who you are.",
        ),
        Milestone::new(
            "streak_12",
            12,
            "A full protocol",
            "Twelve straight weeks, a complete cycle.",
        ),
        Milestone::new(
            "streak_26",
            26,
            "Half a year",
            "Twenty-six consecutive strong weeks.",
        ),
        Milestone::new(
            "streak_52",
            52,
            "One year",
            "Fifty-two weeks without breaking the chain.",
        ),
    ]
}

/// Highest-threshold milestone with `streak_threshold <= streak` whose id is
/// not in `seen` and that lies above every seen milestone. Ties on threshold
/// go to the earlier catalog entry.
pub fn unseen_milestone<'a>(
    catalog: &'a [Milestone],
    streak: u32,
    seen: &HashSet<String>,
) -> Option<&'a Milestone> {
    let ceiling = seen_ceiling(catalog, seen);
    catalog
        .iter()
        .filter(|m| m.streak_threshold <= streak && !seen.contains(&m.id))
        .filter(|m| ceiling.map_or(true, |c| m.streak_threshold > c))
        .fold(None, |best: Option<&Milestone>, m| match best {
            Some(b) if b.streak_threshold >= m.streak_threshold => Some(b),
            _ => Some(m),
        })
}

/// Highest threshold among seen milestones.
fn seen_ceiling(catalog: &[Milestone], seen: &HashSet<String>) -> Option<u32> {
    catalog
        .iter()
        .filter(|m| seen.contains(&m.id))
        .map(|m| m.streak_threshold)
        .max()
}

/// Milestones reached by `streak`, regardless of seen state.
pub fn reached<'a>(catalog: &'a [Milestone], streak: u32) -> impl Iterator<Item = &'a Milestone> {
    catalog.iter().filter(move |m| m.streak_threshold <= streak)
}
