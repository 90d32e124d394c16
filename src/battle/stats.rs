//! Per-battle combat statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::combat::{ActionKind, ActionOutcome};
use crate::core::types::Round;

/// Counters for one combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStats {
    pub actions: u32,
    pub damage_dealt: i64,
    pub critical_hits: u32,
}

#[derive(Debug, Clone)]
pub struct CombatStats {
    per_actor: BTreeMap<String, ActorStats>,
    knockouts: Vec<String>,
    rounds: Round,
    total_actions: u32,
    started_at: Instant,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            per_actor: BTreeMap::new(),
            knockouts: Vec::new(),
            rounds: 0,
            total_actions: 0,
            started_at: Instant::now(),
        }
    }
}

impl CombatStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every counter and restart the timer
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_action(&mut self, outcome: &ActionOutcome) {
        let entry = self.per_actor.entry(outcome.actor.clone()).or_default();
        entry.actions += 1;
        let damaging = match outcome.kind {
            ActionKind::Attack => true,
            ActionKind::UseAbility => outcome.ability.is_some_and(|a| a.is_offensive()),
            ActionKind::Defend => false,
        };
        if damaging {
            entry.damage_dealt += i64::from(outcome.amount);
        }
        if outcome.critical {
            entry.critical_hits += 1;
        }
        self.total_actions += 1;
    }

    pub fn record_knockout(&mut self, name: impl Into<String>) {
        self.knockouts.push(name.into());
    }

    pub fn record_round(&mut self) {
        self.rounds += 1;
    }

    pub fn actor(&self, name: &str) -> Option<&ActorStats> {
        self.per_actor.get(name)
    }

    pub fn actors(&self) -> &BTreeMap<String, ActorStats> {
        &self.per_actor
    }

    /// Knocked out characters in the order they fell
    pub fn knockouts(&self) -> &[String] {
        &self.knockouts
    }

    pub fn rounds(&self) -> Round {
        self.rounds
    }

    pub fn total_actions(&self) -> u32 {
        self.total_actions
    }

    pub fn total_damage(&self) -> i64 {
        self.per_actor.values().map(|s| s.damage_dealt).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Damage per second of wall time; display only
    pub fn damage_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs <= f64::EPSILON {
            return 0.0;
        }
        self.total_damage() as f64 / secs
    }

    pub fn summary(&self) -> StatsSummary {
        let total = self.total_actions.max(1) as f64;
        let actors = self
            .per_actor
            .iter()
            .map(|(name, stats)| ActorSummary {
                name: name.clone(),
                actions: stats.actions,
                damage_dealt: stats.damage_dealt,
                critical_hits: stats.critical_hits,
                action_share_percent: stats.actions as f64 * 100.0 / total,
            })
            .collect();

        StatsSummary {
            rounds: self.rounds,
            total_actions: self.total_actions,
            total_damage: self.total_damage(),
            knockouts: self.knockouts.clone(),
            elapsed_ms: self.elapsed().as_millis() as u64,
            actors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub name: String,
    pub actions: u32,
    pub damage_dealt: i64,
    pub critical_hits: u32,
    pub action_share_percent: f64,
}

/// Serializable snapshot of a battle's statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub rounds: Round,
    pub total_actions: u32,
    pub total_damage: i64,
    pub knockouts: Vec<String>,
    pub elapsed_ms: u64,
    pub actors: Vec<ActorSummary>,
}
