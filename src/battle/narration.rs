//! Battle narration
//!
//! The orchestrator describes what happens as `Narration` values and hands
//! them to a `BattleSink`. Formatting is the sink's business.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use tracing::{debug, info};

use crate::combat::{ActionKind, ActionOutcome};
use crate::core::types::{Round, Side};

/// Health line for one combatant at the start of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantStatus {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Narration {
    BattleStarted {
        side_a: String,
        side_b: String,
    },
    RoundStarted {
        round: Round,
        side_a: Vec<CombatantStatus>,
        side_b: Vec<CombatantStatus>,
    },
    ActionResolved {
        side: Side,
        outcome: ActionOutcome,
    },
    KnockedOut {
        side: Side,
        name: String,
    },
    ExperienceAwarded {
        name: String,
        amount: u32,
        levels_gained: u32,
    },
    BattleEnded {
        summary: String,
    },
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narration::BattleStarted { side_a, side_b } => {
                write!(f, "{} vs {}", side_a, side_b)
            }
            Narration::RoundStarted { round, .. } => write!(f, "Round {}", round),
            Narration::ActionResolved { outcome, .. } => {
                let target = outcome.target.as_deref().unwrap_or(&outcome.actor);
                match outcome.kind {
                    ActionKind::Attack => {
                        write!(f, "{} hits {} for {}", outcome.actor, target, outcome.amount)?;
                        if outcome.critical {
                            write!(f, " (critical)")?;
                        }
                        Ok(())
                    }
                    ActionKind::Defend => {
                        write!(f, "{} defends (+{} HP)", outcome.actor, outcome.amount)
                    }
                    ActionKind::UseAbility => {
                        let ability = outcome
                            .ability
                            .map(|a| a.id())
                            .unwrap_or("an ability");
                        write!(
                            f,
                            "{} uses {} on {} ({})",
                            outcome.actor, ability, target, outcome.amount
                        )
                    }
                }
            }
            Narration::KnockedOut { name, .. } => write!(f, "{} is knocked out", name),
            Narration::ExperienceAwarded {
                name,
                amount,
                levels_gained,
            } => {
                write!(f, "{} gains {} XP", name, amount)?;
                if *levels_gained > 0 {
                    write!(f, " and {} level(s)", levels_gained)?;
                }
                Ok(())
            }
            Narration::BattleEnded { summary } => write!(f, "{}", summary),
        }
    }
}

/// Receives narration as the battle unfolds
pub trait BattleSink {
    fn narrate(&self, narration: &Narration);
}

/// Writes narration as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl BattleSink for TracingSink {
    fn narrate(&self, narration: &Narration) {
        match narration {
            Narration::ActionResolved { side, .. } => debug!(%side, "{}", narration),
            Narration::RoundStarted { round, side_a, side_b } => {
                info!(
                    round,
                    side_a_alive = side_a.len(),
                    side_b_alive = side_b.len(),
                    "{}",
                    narration
                )
            }
            _ => info!("{}", narration),
        }
    }
}

/// Keeps every narration in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<Narration>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn narrations(&self) -> Vec<Narration> {
        self.lines.borrow().clone()
    }
}

impl BattleSink for RecordingSink {
    fn narrate(&self, narration: &Narration) {
        self.lines.borrow_mut().push(narration.clone());
    }
}
