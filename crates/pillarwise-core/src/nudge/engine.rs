use chrono::{DateTime, FixedOffset};

use super::{default_rules, Nudge, NudgeContext, NudgeRule, NudgeSettings};
use crate::activity::ActivityLog;

/// Evaluates a rule catalog and returns the most urgent match.
#[derive(Debug, Clone)]
pub struct NudgeEngine {
    rules: Vec<NudgeRule>,
    settings: NudgeSettings,
}

impl NudgeEngine {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            settings: NudgeSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: NudgeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_rules(mut self, rules: Vec<NudgeRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &[NudgeRule] {
        &self.rules
    }

    /// Every matching nudge in catalog order.
    pub fn candidates(&self, logs: &[ActivityLog], now: DateTime<FixedOffset>) -> Vec<Nudge> {
        if !self.settings.enabled {
            return Vec::new();
        }
        let ctx = NudgeContext::new(logs, now, &self.settings);
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx))
            .collect()
    }

    /// The lowest-priority-value candidate. Ties go to the rule declared first.
    ///
    /// `logs` are the entries for the week containing `now`.
    pub fn generate(&self, logs: &[ActivityLog], now: DateTime<FixedOffset>) -> Option<Nudge> {
        let candidates = self.candidates(logs, now);
        let selected = candidates.into_iter().min_by_key(|n| n.priority);
        if let Some(nudge) = &selected {
            tracing::debug!(nudge = %nudge.id, priority = nudge.priority, "nudge selected");
        }
        selected
    }
}

impl Default for NudgeEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// [`NudgeEngine::generate`] with the default catalog and settings.
pub fn generate_nudge(logs: &[ActivityLog], now: DateTime<FixedOffset>) -> Option<Nudge> {
    NudgeEngine::new().generate(logs, now)
}
