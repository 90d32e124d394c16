use rand::{Rng, RngCore};

use crate::battle::ai::CombatStrategy;
use crate::character::SharedCharacter;
use crate::combat::Action;

/// Chance threshold above which an owned offensive ability is used
const ABILITY_THRESHOLD: f64 = 0.3;

/// Hits as hard as possible, using the first offensive ability it was granted
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveStrategy;

impl CombatStrategy for AggressiveStrategy {
    fn choose(
        &self,
        actor: &SharedCharacter,
        opponent: &SharedCharacter,
        rng: &mut dyn RngCore,
    ) -> Action {
        let preferred = {
            let me = actor.borrow();
            if me.abilities().is_empty() {
                None
            } else if rng.gen::<f64>() > ABILITY_THRESHOLD {
                me.abilities().iter().copied().find(|a| a.is_offensive())
            } else {
                None
            }
        };

        match preferred {
            Some(ability) => Action::use_ability(actor, opponent, ability),
            None => Action::attack(actor, opponent),
        }
    }

    fn name(&self) -> &'static str {
        "Aggressive"
    }

    fn description(&self) -> &'static str {
        "Attacks relentlessly and favours its strongest damaging ability"
    }
}
