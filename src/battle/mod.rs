//! Battle system - strategies, the turn loop and what it leaves behind
//!
//! - `ai`: per-combatant decision policies
//! - `execution`: the orchestrator driving two hierarchies to an outcome
//! - `history` / `stats`: append-only action log and per-battle counters
//! - `narration`: semantic battle events for a display sink
//! - `duel`: single attack and counter between two characters

pub mod ai;
pub mod duel;
pub mod execution;
pub mod history;
pub mod narration;
pub mod stats;

// Re-exports for convenient access
pub use ai::{
    AggressiveStrategy, BalancedStrategy, CombatStrategy, DefensiveStrategy, StrategyKind,
};
pub use duel::{duel, DuelReport, DUEL_TIE_EXPERIENCE, DUEL_WIN_EXPERIENCE};
pub use execution::{
    BattleOrchestrator, BattleOutcome, BattlePhase, BattleReport, DrawReason, RoundSummary,
};
pub use history::ActionHistory;
pub use narration::{BattleSink, CombatantStatus, Narration, RecordingSink, TracingSink};
pub use stats::{ActorStats, ActorSummary, CombatStats, StatsSummary};
