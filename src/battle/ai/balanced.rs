use rand::{Rng, RngCore};

use crate::battle::ai::{random_ability, CombatStrategy};
use crate::character::{Ability, SharedCharacter};
use crate::combat::Action;

/// Health fraction considered critical, for self and for the opponent
const CRITICAL_HEALTH: f64 = 0.3;

/// Mixes attacks, guards and abilities depending on how the fight is going
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedStrategy;

impl CombatStrategy for BalancedStrategy {
    fn choose(
        &self,
        actor: &SharedCharacter,
        opponent: &SharedCharacter,
        rng: &mut dyn RngCore,
    ) -> Action {
        let (own_fraction, abilities) = {
            let me = actor.borrow();
            (me.health_fraction(), me.abilities().to_vec())
        };
        let opponent_fraction = opponent.borrow().health_fraction();

        if own_fraction < CRITICAL_HEALTH {
            if abilities.contains(&Ability::Regeneration) && rng.gen::<f64>() > 0.5 {
                return Action::use_ability(actor, actor, Ability::Regeneration);
            }
            return Action::defend(actor);
        }

        if opponent_fraction < CRITICAL_HEALTH {
            // Finish them off
            if !abilities.is_empty() && rng.gen::<f64>() > 0.5 {
                if let Some(ability) = random_ability(&abilities, rng) {
                    return Action::use_ability(actor, opponent, ability);
                }
            }
            return Action::attack(actor, opponent);
        }

        let roll = rng.gen::<f64>();
        if roll > 0.7 {
            Action::defend(actor)
        } else if roll > 0.3 && !abilities.is_empty() {
            match random_ability(&abilities, rng) {
                Some(ability) => Action::use_ability(actor, opponent, ability),
                None => Action::attack(actor, opponent),
            }
        } else {
            Action::attack(actor, opponent)
        }
    }

    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn description(&self) -> &'static str {
        "Adapts to both fighters' health, mixing attacks, guards and abilities"
    }
}
