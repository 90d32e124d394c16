//! Combat actions
//!
//! An `Action` names who does what to whom. `execute` performs it once
//! against live characters; calling it again rolls fresh randomness and
//! applies a second, different result. `to_record` takes a plain snapshot
//! that holds no references and can be rendered or serialized at any time.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::character::{Ability, SharedCharacter};
use crate::combat::engine;
use crate::core::types::now_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Defend,
    UseAbility,
}

impl ActionKind {
    /// Tag used in records
    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Attack => "ATTACK",
            ActionKind::Defend => "DEFEND",
            ActionKind::UseAbility => "USE_ABILITY",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Attack {
        actor: SharedCharacter,
        target: SharedCharacter,
    },
    Defend {
        actor: SharedCharacter,
    },
    UseAbility {
        actor: SharedCharacter,
        target: SharedCharacter,
        ability: Ability,
    },
}

/// What one execution did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub actor: String,
    pub target: Option<String>,
    pub ability: Option<Ability>,
    /// Damage dealt or health restored, after clamping
    pub amount: i32,
    pub critical: bool,
    /// The target went from alive to zero health
    pub knocked_out: bool,
}

impl Action {
    pub fn attack(actor: &SharedCharacter, target: &SharedCharacter) -> Self {
        Action::Attack {
            actor: Rc::clone(actor),
            target: Rc::clone(target),
        }
    }

    pub fn defend(actor: &SharedCharacter) -> Self {
        Action::Defend {
            actor: Rc::clone(actor),
        }
    }

    pub fn use_ability(actor: &SharedCharacter, target: &SharedCharacter, ability: Ability) -> Self {
        Action::UseAbility {
            actor: Rc::clone(actor),
            target: Rc::clone(target),
            ability,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack { .. } => ActionKind::Attack,
            Action::Defend { .. } => ActionKind::Defend,
            Action::UseAbility { .. } => ActionKind::UseAbility,
        }
    }

    pub fn actor(&self) -> &SharedCharacter {
        match self {
            Action::Attack { actor, .. }
            | Action::Defend { actor }
            | Action::UseAbility { actor, .. } => actor,
        }
    }

    pub fn target(&self) -> Option<&SharedCharacter> {
        match self {
            Action::Attack { target, .. } | Action::UseAbility { target, .. } => Some(target),
            Action::Defend { .. } => None,
        }
    }

    pub fn ability(&self) -> Option<Ability> {
        match self {
            Action::UseAbility { ability, .. } => Some(*ability),
            _ => None,
        }
    }

    /// Apply the action to live state. Not idempotent.
    pub fn execute(&self, rng: &mut dyn RngCore) -> ActionOutcome {
        let actor_name = self.actor().borrow().name().to_string();
        let target_name = self.target().map(|t| t.borrow().name().to_string());

        let outcome = match self {
            Action::Attack { actor, target } => {
                let roll = engine::roll_attack(&*actor.borrow(), rng);
                let (amount, knocked_out) = damage(target, roll.damage);
                ActionOutcome {
                    kind: ActionKind::Attack,
                    actor: actor_name,
                    target: target_name,
                    ability: None,
                    amount,
                    critical: roll.critical,
                    knocked_out,
                }
            }
            Action::Defend { actor } => {
                let bonus = engine::defense_bonus(&actor.borrow());
                let amount = engine::apply_heal(&mut actor.borrow_mut(), bonus);
                ActionOutcome {
                    kind: ActionKind::Defend,
                    actor: actor_name,
                    target: None,
                    ability: None,
                    amount,
                    critical: false,
                    knocked_out: false,
                }
            }
            Action::UseAbility {
                actor,
                target,
                ability,
            } => {
                let effect = engine::ability_effect(&actor.borrow(), *ability);
                let (amount, knocked_out) = match ability {
                    Ability::Regeneration => {
                        (engine::apply_heal(&mut actor.borrow_mut(), effect), false)
                    }
                    Ability::Invisibility => (0, false),
                    _ => damage(target, effect),
                };
                ActionOutcome {
                    kind: ActionKind::UseAbility,
                    actor: actor_name,
                    target: target_name,
                    ability: Some(*ability),
                    amount,
                    critical: false,
                    knocked_out,
                }
            }
        };

        debug!(
            kind = %outcome.kind,
            actor = %outcome.actor,
            amount = outcome.amount,
            critical = outcome.critical,
            "Action resolved"
        );
        outcome
    }

    /// Snapshot of this action for history. Side-effect free.
    pub fn to_record(&self) -> ActionRecord {
        let mut args = BTreeMap::new();
        match self {
            Action::Attack { actor, target } => {
                args.insert("attacker".to_string(), actor.borrow().name().to_string());
                args.insert("target".to_string(), target.borrow().name().to_string());
            }
            Action::Defend { actor } => {
                args.insert("defender".to_string(), actor.borrow().name().to_string());
            }
            Action::UseAbility {
                actor,
                target,
                ability,
            } => {
                args.insert("user".to_string(), actor.borrow().name().to_string());
                args.insert("target".to_string(), target.borrow().name().to_string());
                args.insert("ability".to_string(), ability.id().to_string());
            }
        }
        ActionRecord {
            kind: self.kind(),
            args,
            timestamp_ms: now_millis(),
        }
    }
}

fn damage(target: &SharedCharacter, amount: i32) -> (i32, bool) {
    let mut target = target.borrow_mut();
    let was_alive = target.is_alive();
    let applied = engine::apply_damage(&mut target, amount);
    (applied, was_alive && target.is_defeated())
}

/// Immutable description of a committed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub args: BTreeMap<String, String>,
    pub timestamp_ms: u64,
}

impl ActionRecord {
    /// e.g. `ATTACK {attacker=Ayla, target=Brom}`
    pub fn render(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        format!("{} {{{}}}", self.kind.tag(), args.join(", "))
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterBuilder;
    use crate::core::config::GameSettings;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shared(name: &str, stats: (i32, i32, i32), abilities: &[Ability]) -> SharedCharacter {
        let builder = abilities
            .iter()
            .fold(CharacterBuilder::new(name).stats(stats.0, stats.1, stats.2), |b, &a| {
                b.ability(a)
            });
        builder.build_shared(&GameSettings::default(), &[]).unwrap()
    }

    #[test]
    fn test_attack_damages_target() {
        let a = shared("Ayla", (20, 0, 10), &[]);
        let b = shared("Brom", (10, 10, 10), &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = Action::attack(&a, &b).execute(&mut rng);
        assert_eq!(outcome.kind, ActionKind::Attack);
        assert_eq!(b.borrow().health(), 100 - outcome.amount);
        assert!(!outcome.knocked_out);
    }

    #[test]
    fn test_defend_heals_self_up_to_max() {
        let a = shared("Ayla", (10, 10, 10), &[]);
        a.borrow_mut().set_health(90);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = Action::defend(&a).execute(&mut rng);
        assert_eq!(outcome.amount, 10);
        assert_eq!(a.borrow().health(), 100);
    }

    #[test]
    fn test_regeneration_heals_user_even_when_self_targeted() {
        let a = shared("Troll", (10, 10, 10), &[Ability::Regeneration]);
        a.borrow_mut().set_health(40);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = Action::use_ability(&a, &a, Ability::Regeneration).execute(&mut rng);
        assert_eq!(outcome.amount, 30);
        assert_eq!(a.borrow().health(), 70);
    }

    #[test]
    fn test_invisibility_does_nothing() {
        let a = shared("Shade", (10, 10, 10), &[Ability::Invisibility]);
        let b = shared("Brom", (10, 10, 10), &[]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = Action::use_ability(&a, &b, Ability::Invisibility).execute(&mut rng);
        assert_eq!(outcome.amount, 0);
        assert_eq!(b.borrow().health(), 100);
    }

    #[test]
    fn test_knockout_flag() {
        let a = shared("Ayla", (20, 10, 10), &[Ability::SuperForce]);
        let b = shared("Brom", (10, 10, 10), &[]);
        b.borrow_mut().set_health(5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = Action::use_ability(&a, &b, Ability::SuperForce).execute(&mut rng);
        assert!(outcome.knocked_out);
        assert_eq!(outcome.amount, 5);

        // Hitting an already defeated target is not a second knockout
        let again = Action::attack(&a, &b).execute(&mut rng);
        assert!(!again.knocked_out);
        assert_eq!(again.amount, 0);
    }

    #[test]
    fn test_record_is_pure() {
        let a = shared("Ayla", (10, 10, 10), &[]);
        let b = shared("Brom", (10, 10, 10), &[]);
        let action = Action::attack(&a, &b);

        let record = action.to_record();
        assert_eq!(record.render(), "ATTACK {attacker=Ayla, target=Brom}");
        assert_eq!(b.borrow().health(), 100);
        assert_eq!(a.borrow().health(), 100);
    }

    #[test]
    fn test_ability_record_args() {
        let a = shared("Ayla", (10, 10, 10), &[Ability::FirePower]);
        let b = shared("Brom", (10, 10, 10), &[]);
        let record = Action::use_ability(&a, &b, Ability::FirePower).to_record();
        assert_eq!(record.kind, ActionKind::UseAbility);
        assert_eq!(record.args.get("ability").map(String::as_str), Some("Fire Power"));
        assert_eq!(
            record.render(),
            "USE_ABILITY {ability=Fire Power, target=Brom, user=Ayla}"
        );
    }
}
