use rand::{Rng, RngCore};

use crate::battle::ai::CombatStrategy;
use crate::character::{Ability, SharedCharacter};
use crate::combat::Action;

/// Below this health fraction the actor only tries to recover
const LOW_HEALTH: f64 = 0.5;

/// Draw needed to attack when healthy
const ATTACK_THRESHOLD: f64 = 0.6;

/// Protects itself first and attacks only occasionally
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensiveStrategy;

impl CombatStrategy for DefensiveStrategy {
    fn choose(
        &self,
        actor: &SharedCharacter,
        opponent: &SharedCharacter,
        rng: &mut dyn RngCore,
    ) -> Action {
        let (fraction, can_regenerate) = {
            let me = actor.borrow();
            (me.health_fraction(), me.has_ability(Ability::Regeneration))
        };

        if fraction < LOW_HEALTH {
            return if can_regenerate {
                Action::use_ability(actor, actor, Ability::Regeneration)
            } else {
                Action::defend(actor)
            };
        }

        if rng.gen::<f64>() > ATTACK_THRESHOLD {
            Action::attack(actor, opponent)
        } else {
            Action::defend(actor)
        }
    }

    fn name(&self) -> &'static str {
        "Defensive"
    }

    fn description(&self) -> &'static str {
        "Guards and regenerates when hurt, attacks only now and then"
    }
}
