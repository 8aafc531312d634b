//! The five fixed health pillars and their static weekly targets.
//!
//! Targets, units and presentation hints are compiled in and are not
//! user-editable. `Pillar::ALL` is the canonical iteration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the five weekly health categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Cardio,
    Strength,
    Sleep,
    CleanEating,
    Mindfulness,
}

/// Static configuration for a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PillarConfig {
    pub label: &'static str,
    /// Amount that must be logged within one week for the pillar to be met
    pub weekly_target: f64,
    pub unit: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

const CARDIO: PillarConfig = PillarConfig {
    label: "Cardio",
    weekly_target: 150.0,
    unit: "minutes",
    color: "#ef4444",
    icon: "heart-pulse",
};

const STRENGTH: PillarConfig = PillarConfig {
    label: "Strength",
    weekly_target: 3.0,
    unit: "sessions",
    color: "#f97316",
    icon: "dumbbell",
};

const SLEEP: PillarConfig = PillarConfig {
    label: "Sleep",
    weekly_target: 49.0,
    unit: "hours",
    color: "#6366f1",
    icon: "moon",
};

const CLEAN_EATING: PillarConfig = PillarConfig {
    label: "Clean Eating",
    weekly_target: 5.0,
    unit: "days",
    color: "#22c55e",
    icon: "salad",
};

const MINDFULNESS: PillarConfig = PillarConfig {
    label: "Mindfulness",
    weekly_target: 70.0,
    unit: "minutes",
    color: "#a855f7",
    icon: "lotus",
};

impl Pillar {
    /// All pillars in canonical order.
    pub const ALL: [Pillar; 5] = [
        Pillar::Cardio,
        Pillar::Strength,
        Pillar::Sleep,
        Pillar::CleanEating,
        Pillar::Mindfulness,
    ];

    pub fn config(&self) -> &'static PillarConfig {
        match self {
            Pillar::Cardio => &CARDIO,
            Pillar::Strength => &STRENGTH,
            Pillar::Sleep => &SLEEP,
            Pillar::CleanEating => &CLEAN_EATING,
            Pillar::Mindfulness => &MINDFULNESS,
        }
    }

    pub fn target(&self) -> f64 {
        self.config().weekly_target
    }

    pub fn unit(&self) -> &'static str {
        self.config().unit
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    /// Stable snake_case key used in storage and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Cardio => "cardio",
            Pillar::Strength => "strength",
            Pillar::Sleep => "sleep",
            Pillar::CleanEating => "clean_eating",
            Pillar::Mindfulness => "mindfulness",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Pillar::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownPillar(s.to_string()))
    }
}
