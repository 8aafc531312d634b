//! Built-in nudge catalog.
//!
//! Declaration order is the tie-break: when two matching rules share a
//! priority, the one declared first wins.

use chrono::{Datelike, Weekday};

use super::{Nudge, NudgeAction, NudgeContext, NudgeRule};
use crate::pillar::Pillar;

pub fn default_rules() -> Vec<NudgeRule> {
    vec![
        NudgeRule {
            id: "near_completion",
            priority: 0,
            when: |ctx| ctx.coverage == 4,
            build: near_completion,
        },
        NudgeRule {
            id: "deadline_risk",
            priority: 1,
            when: |ctx| {
                ctx.days_remaining <= ctx.settings.deadline_days && at_risk_pillar(ctx).is_some()
            },
            build: deadline_risk,
        },
        NudgeRule {
            id: "stagnation",
            priority: 2,
            when: |ctx| {
                ctx.days_remaining <= ctx.settings.stagnation_days
                    && untouched_pillar(ctx).is_some()
            },
            build: stagnation,
        },
        NudgeRule {
            id: "morning_sleep",
            priority: 3,
            when: |ctx| (6..=10).contains(&ctx.hour()) && ctx.needs_reminder(Pillar::Sleep),
            build: |_| {
                reminder(
                    Pillar::Sleep,
                    "Good morning. How did you sleep? Log last night's hours.",
                )
            },
        },
        NudgeRule {
            id: "midday_clean_eating",
            priority: 3,
            when: |ctx| {
                (11..=14).contains(&ctx.hour()) && ctx.needs_reminder(Pillar::CleanEating)
            },
            build: |_| {
                reminder(
                    Pillar::CleanEating,
                    "Lunchtime check-in: is today a clean eating day?",
                )
            },
        },
        NudgeRule {
            id: "evening_movement",
            priority: 3,
            when: |ctx| (17..=20).contains(&ctx.hour()) && evening_pillar(ctx).is_some(),
            build: |ctx| {
                let pillar = evening_pillar(ctx).unwrap_or(Pillar::Cardio);
                let message = match pillar {
                    Pillar::Strength => "Cardio is covered. Fit in a strength session this evening?",
                    _ => "Evening window: a walk, ride or run counts toward cardio.",
                };
                reminder(pillar, message)
            },
        },
        NudgeRule {
            id: "night_mindfulness",
            priority: 3,
            when: |ctx| {
                (21..=23).contains(&ctx.hour()) && ctx.needs_reminder(Pillar::Mindfulness)
            },
            build: |_| {
                reminder(
                    Pillar::Mindfulness,
                    "Wind down with a few minutes of mindfulness before bed.",
                )
            },
        },
        NudgeRule {
            id: "weekly_review",
            priority: 5,
            when: in_review_window,
            build: |_| Nudge {
                id: String::new(),
                message: "The week is turning over. Take two minutes to review how it went."
                    .to_string(),
                pillar: None,
                action: Some(NudgeAction::ReviewWeek),
                priority: 0,
            },
        },
        NudgeRule {
            id: "all_complete",
            priority: 6,
            when: |ctx| ctx.coverage == 5,
            build: |_| Nudge {
                id: String::new(),
                message: "All five pillars met this week. Anything more is a bonus.".to_string(),
                pillar: None,
                action: Some(NudgeAction::ViewProgress),
                priority: 0,
            },
        },
    ]
}

fn reminder(pillar: Pillar, message: &str) -> Nudge {
    Nudge {
        id: String::new(),
        message: message.to_string(),
        pillar: Some(pillar),
        action: Some(NudgeAction::LogPillar { pillar }),
        priority: 0,
    }
}

/// Render an amount without a trailing `.0`.
fn amount(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn near_completion(ctx: &NudgeContext) -> Nudge {
    // coverage == 4 guarantees exactly one unmet pillar
    let state = ctx
        .states
        .iter()
        .find(|s| !s.met)
        .copied()
        .unwrap_or(ctx.states[0]);
    let pillar = state.pillar;
    Nudge {
        id: String::new(),
        message: format!(
            "One pillar to go: {} more {} of {} to hit all five this week.",
            amount(state.remaining()),
            pillar.unit(),
            pillar.label().to_lowercase(),
        ),
        pillar: Some(pillar),
        action: Some(NudgeAction::LogPillar { pillar }),
        priority: 0,
    }
}

/// First started-but-unmet pillar whose gap exceeds the materiality ratio.
fn at_risk_pillar(ctx: &NudgeContext) -> Option<Pillar> {
    ctx.states
        .iter()
        .find(|s| {
            s.current > 0.0
                && !s.met
                && s.remaining() > s.target * ctx.settings.deadline_gap_ratio
        })
        .map(|s| s.pillar)
}

fn deadline_risk(ctx: &NudgeContext) -> Nudge {
    let pillar = at_risk_pillar(ctx).unwrap_or(Pillar::Cardio);
    let state = ctx.state(pillar);
    let days = ctx.days_remaining;
    Nudge {
        id: String::new(),
        message: format!(
            "{} {} left and {} is {} {} short. Time to push.",
            days,
            if days == 1 { "day" } else { "days" },
            pillar.label(),
            amount(state.remaining()),
            pillar.unit(),
        ),
        pillar: Some(pillar),
        action: Some(NudgeAction::LogPillar { pillar }),
        priority: 0,
    }
}

/// First pillar with nothing logged this week.
fn untouched_pillar(ctx: &NudgeContext) -> Option<Pillar> {
    ctx.states
        .iter()
        .find(|s| s.current == 0.0)
        .map(|s| s.pillar)
}

fn stagnation(ctx: &NudgeContext) -> Nudge {
    let pillar = untouched_pillar(ctx).unwrap_or(Pillar::Cardio);
    Nudge {
        id: String::new(),
        message: format!(
            "You haven't started {} this week. Even a small entry keeps it moving.",
            pillar.label().to_lowercase()
        ),
        pillar: Some(pillar),
        action: Some(NudgeAction::LogPillar { pillar }),
        priority: 0,
    }
}

/// Cardio if it still needs a reminder, otherwise strength.
fn evening_pillar(ctx: &NudgeContext) -> Option<Pillar> {
    [Pillar::Cardio, Pillar::Strength]
        .into_iter()
        .find(|p| ctx.needs_reminder(*p))
}

/// Sunday from 18:00 through Monday 11:59.
fn in_review_window(ctx: &NudgeContext) -> bool {
    match ctx.now.weekday() {
        Weekday::Sun => ctx.hour() >= 18,
        Weekday::Mon => ctx.hour() < 12,
        _ => false,
    }
}
