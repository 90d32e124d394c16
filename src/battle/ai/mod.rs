//! Combat strategies
//!
//! Architecture: trait + stateless policies
//! - `CombatStrategy` is the swappable decision interface
//! - Each policy reads actor/opponent state and draws from the caller's RNG
//! - `StrategyKind` names a policy so it can be chosen from CLI or config
//!
//! The number and order of RNG draws in each policy is fixed: a seeded
//! stream always yields the same decisions.

mod aggressive;
mod balanced;
mod defensive;

pub use aggressive::AggressiveStrategy;
pub use balanced::BalancedStrategy;
pub use defensive::DefensiveStrategy;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::character::{Ability, SharedCharacter};
use crate::combat::Action;

/// Decision policy for one combatant's turn
pub trait CombatStrategy {
    /// Pick the next action for `actor` facing `opponent`
    fn choose(
        &self,
        actor: &SharedCharacter,
        opponent: &SharedCharacter,
        rng: &mut dyn RngCore,
    ) -> Action;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

/// Named strategy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Aggressive,
    Defensive,
    Balanced,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Aggressive,
        StrategyKind::Defensive,
        StrategyKind::Balanced,
    ];

    pub fn build(self) -> Box<dyn CombatStrategy> {
        match self {
            StrategyKind::Aggressive => Box::new(AggressiveStrategy),
            StrategyKind::Defensive => Box::new(DefensiveStrategy),
            StrategyKind::Balanced => Box::new(BalancedStrategy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Defensive => "defensive",
            StrategyKind::Balanced => "balanced",
        };
        f.write_str(name)
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aggressive" => Ok(StrategyKind::Aggressive),
            "defensive" => Ok(StrategyKind::Defensive),
            "balanced" => Ok(StrategyKind::Balanced),
            other => Err(format!("Unknown strategy: {}", other)),
        }
    }
}

/// Uniformly pick one of the actor's abilities
fn random_ability(abilities: &[Ability], rng: &mut dyn RngCore) -> Option<Ability> {
    if abilities.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..abilities.len());
    abilities.get(index).copied()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_kind_parses() {
        assert_eq!("Aggressive".parse(), Ok(StrategyKind::Aggressive));
        assert_eq!(" balanced ".parse(), Ok(StrategyKind::Balanced));
        assert!("reckless".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_kind_builds_matching_strategy() {
        for kind in StrategyKind::ALL {
            let strategy = kind.build();
            assert_eq!(strategy.name().to_lowercase(), kind.to_string());
            assert!(!strategy.description().is_empty());
        }
    }
}
