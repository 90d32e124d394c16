//! Battle execution loop
//!
//! Each round: side A acts, then side B. Within a side's turn every living
//! actor picks a random living opponent, asks its strategy for an action and
//! executes it. After each side's turn knocked out opponents are removed and
//! victory is checked. Between completed rounds: stalemate cap, then the
//! caller's continue poll.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::battle::ai::CombatStrategy;
use crate::battle::history::ActionHistory;
use crate::battle::narration::{BattleSink, CombatantStatus, Narration, TracingSink};
use crate::battle::stats::{CombatStats, StatsSummary};
use crate::character::SharedCharacter;
use crate::combat::Action;
use crate::core::config::BattleConfig;
use crate::core::error::BattleSetupError;
use crate::core::types::{Round, Side};
use crate::team::{TeamEvent, TeamNode};

/// Why a battle ended without a winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// Round cap reached
    Stalemate,
    /// The continue poll answered no
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory(Side),
    Draw(DrawReason),
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Victory(side) => write!(f, "Victory for {}", side),
            BattleOutcome::Draw(DrawReason::Stalemate) => write!(f, "Draw (round limit reached)"),
            BattleOutcome::Draw(DrawReason::Cancelled) => write!(f, "Draw (battle abandoned)"),
        }
    }
}

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Init,
    RoundInProgress(Side),
    RoundComplete,
    Finished(BattleOutcome),
}

/// State handed to the continue poll between rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: Round,
    pub side_a_alive: usize,
    pub side_b_alive: usize,
}

/// Result of a finished battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Completed rounds
    pub rounds: Round,
    pub side_a_survivors: Vec<String>,
    pub side_b_survivors: Vec<String>,
    pub stats: StatsSummary,
}

/// Runs battles between two hierarchies
///
/// Owns the random stream; the engine and strategies borrow it, so one seed
/// determines the whole battle.
pub struct BattleOrchestrator<R = ChaCha8Rng> {
    config: BattleConfig,
    rng: R,
    phase: BattlePhase,
    history: ActionHistory,
    stats: CombatStats,
    sink: Box<dyn BattleSink>,
}

impl BattleOrchestrator<ChaCha8Rng> {
    /// Seeded from OS entropy
    pub fn new(config: BattleConfig) -> Self {
        Self::from_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create with specific RNG seed for deterministic battles
    pub fn with_seed(config: BattleConfig, seed: u64) -> Self {
        Self::from_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> BattleOrchestrator<R> {
    pub fn from_rng(config: BattleConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            phase: BattlePhase::Init,
            history: ActionHistory::new(),
            stats: CombatStats::new(),
            sink: Box::new(TracingSink),
        }
    }

    /// Replace the narration sink
    pub fn with_sink(mut self, sink: Box<dyn BattleSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Fight until one side is wiped out, the round cap is hit, or the
    /// continue poll says stop.
    ///
    /// Fails before touching any state when either side has no living
    /// character.
    pub fn start_battle(
        &mut self,
        side_a: &TeamNode,
        side_b: &TeamNode,
        strategy_a: &dyn CombatStrategy,
        strategy_b: &dyn CombatStrategy,
        mut should_continue: impl FnMut(&RoundSummary) -> bool,
    ) -> Result<BattleReport, BattleSetupError> {
        let mut living_a = side_a.living_characters();
        let mut living_b = side_b.living_characters();
        if living_a.is_empty() {
            return Err(BattleSetupError::EmptySide(side_a.name()));
        }
        if living_b.is_empty() {
            return Err(BattleSetupError::EmptySide(side_b.name()));
        }

        self.stats.reset();
        self.history.clear();
        self.phase = BattlePhase::Init;

        info!(
            side_a = %side_a.name(),
            side_b = %side_b.name(),
            strategy_a = strategy_a.name(),
            strategy_b = strategy_b.name(),
            "Battle started"
        );
        self.sink.narrate(&Narration::BattleStarted {
            side_a: side_a.name(),
            side_b: side_b.name(),
        });
        side_a.notify(&TeamEvent::BattleStarted {
            opponent: side_b.name(),
        });
        side_b.notify(&TeamEvent::BattleStarted {
            opponent: side_a.name(),
        });

        let outcome = 'battle: loop {
            self.sink.narrate(&Narration::RoundStarted {
                round: self.stats.rounds() + 1,
                side_a: statuses(&living_a),
                side_b: statuses(&living_b),
            });

            for side in [Side::A, Side::B] {
                self.phase = BattlePhase::RoundInProgress(side);
                let (actors, opponents, strategy, opponent_root) = match side {
                    Side::A => (&living_a, &mut living_b, strategy_a, side_b),
                    Side::B => (&living_b, &mut living_a, strategy_b, side_a),
                };

                self.take_turn(side, actors, opponents, strategy);
                self.remove_knocked_out(side.opponent(), opponents, opponent_root);

                if opponents.is_empty() {
                    break 'battle BattleOutcome::Victory(side);
                }
            }

            self.stats.record_round();
            self.phase = BattlePhase::RoundComplete;
            let round = self.stats.rounds();

            if round >= self.config.max_rounds {
                break BattleOutcome::Draw(DrawReason::Stalemate);
            }

            if round.checked_rem(self.config.continue_poll_interval) == Some(0) {
                let summary = RoundSummary {
                    round,
                    side_a_alive: living_a.len(),
                    side_b_alive: living_b.len(),
                };
                if !should_continue(&summary) {
                    break BattleOutcome::Draw(DrawReason::Cancelled);
                }
            }
        };

        self.award_experience(outcome, &living_a, &living_b);
        self.phase = BattlePhase::Finished(outcome);

        let summary = format!("{} after {} round(s)", outcome, self.stats.rounds());
        info!(%outcome, rounds = self.stats.rounds(), "Battle ended");
        self.sink.narrate(&Narration::BattleEnded {
            summary: summary.clone(),
        });
        side_a.notify(&TeamEvent::BattleEnded {
            result: summary.clone(),
        });
        side_b.notify(&TeamEvent::BattleEnded { result: summary });

        Ok(BattleReport {
            outcome,
            rounds: self.stats.rounds(),
            side_a_survivors: names(&living_a),
            side_b_survivors: names(&living_b),
            stats: self.stats.summary(),
        })
    }

    fn take_turn(
        &mut self,
        side: Side,
        actors: &[SharedCharacter],
        opponents: &[SharedCharacter],
        strategy: &dyn CombatStrategy,
    ) {
        for actor in actors {
            if !actor.borrow().is_alive() {
                continue;
            }
            let targets: Vec<&SharedCharacter> =
                opponents.iter().filter(|c| c.borrow().is_alive()).collect();
            if targets.is_empty() {
                break;
            }
            let target = targets[self.rng.gen_range(0..targets.len())];

            let mut action = strategy.choose(actor, target, &mut self.rng);
            if let Some(ability) = action.ability() {
                if !actor.borrow().has_ability(ability) {
                    debug!(actor = %actor.borrow().name(), %ability, "Ability not owned, attacking instead");
                    action = Action::attack(actor, target);
                }
            }

            let outcome = action.execute(&mut self.rng);
            self.stats.record_action(&outcome);
            self.history.push(action);
            self.sink
                .narrate(&Narration::ActionResolved { side, outcome });
        }
    }

    fn remove_knocked_out(
        &mut self,
        side: Side,
        members: &mut Vec<SharedCharacter>,
        root: &TeamNode,
    ) {
        for fallen in members.iter().filter(|c| c.borrow().is_defeated()) {
            let name = fallen.borrow().name().to_string();
            self.stats.record_knockout(name.clone());
            self.sink.narrate(&Narration::KnockedOut {
                side,
                name: name.clone(),
            });
            root.notify(&TeamEvent::KnockedOut { character: name });
        }
        members.retain(|c| c.borrow().is_alive());
    }

    fn award_experience(
        &self,
        outcome: BattleOutcome,
        living_a: &[SharedCharacter],
        living_b: &[SharedCharacter],
    ) {
        let (recipients, amount): (Vec<&SharedCharacter>, u32) = match outcome {
            BattleOutcome::Victory(Side::A) => {
                (living_a.iter().collect(), self.config.victory_experience)
            }
            BattleOutcome::Victory(Side::B) => {
                (living_b.iter().collect(), self.config.victory_experience)
            }
            BattleOutcome::Draw(_) => (
                living_a.iter().chain(living_b.iter()).collect(),
                self.config.draw_experience,
            ),
        };

        for character in recipients {
            let (name, levels_gained) = {
                let mut c = character.borrow_mut();
                let levels = c.add_experience(amount);
                (c.name().to_string(), levels)
            };
            self.sink.narrate(&Narration::ExperienceAwarded {
                name,
                amount,
                levels_gained,
            });
        }
    }
}

fn statuses(members: &[SharedCharacter]) -> Vec<CombatantStatus> {
    members
        .iter()
        .map(|c| {
            let c = c.borrow();
            CombatantStatus {
                name: c.name().to_string(),
                health: c.health(),
                max_health: c.max_health(),
            }
        })
        .collect()
}

fn names(members: &[SharedCharacter]) -> Vec<String> {
    members
        .iter()
        .map(|c| c.borrow().name().to_string())
        .collect()
}
