use crate::activity::ActivityLog;
use crate::pillar::Pillar;

use super::progress::met;

/// Number of pillars that met their target, in `0..=5`.
pub fn coverage(logs: &[ActivityLog]) -> u8 {
    Pillar::ALL
        .iter()
        .filter(|pillar| met(logs, **pillar))
        .count() as u8
}

/// Pillars still below target, in canonical order.
pub fn unmet_pillars(logs: &[ActivityLog]) -> Vec<Pillar> {
    Pillar::ALL
        .into_iter()
        .filter(|pillar| !met(logs, *pillar))
        .collect()
}
