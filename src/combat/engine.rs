//! Combat resolution formulas
//!
//! Stateless. Every random draw goes through the caller's RNG so a seeded
//! stream reproduces the same fight. Nothing here fails; out-of-range inputs
//! are clamped.

use rand::Rng;

use crate::character::{Ability, Character};

/// Upper bound (inclusive) of the random attack variance
pub const ATTACK_VARIANCE: i32 = 10;

/// Crit chance never exceeds this many percent
pub const MAX_CRIT_CHANCE: i32 = 30;

/// Flat part of the defend bonus
pub const DEFENSE_BASE: i32 = 20;

/// Healing done by Regeneration
pub const REGENERATION_HEAL: i32 = 30;

/// Damage and crit flag from one attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub damage: i32,
    pub critical: bool,
}

/// Crit chance in percent
pub fn crit_chance(attacker: &Character) -> i32 {
    (attacker.agility() / 2).clamp(0, MAX_CRIT_CHANCE)
}

/// Roll attack damage: strength + variance + power/10, then the crit check
pub fn roll_attack<R: Rng + ?Sized>(attacker: &Character, rng: &mut R) -> AttackRoll {
    let variance = rng.gen_range(0..=ATTACK_VARIANCE);
    let mut damage = attacker.strength() + variance + attacker.power_level() / 10;

    let critical = rng.gen_range(0..100) < crit_chance(attacker);
    if critical {
        damage = damage * 3 / 2;
    }

    AttackRoll {
        damage: damage.max(0),
        critical,
    }
}

/// Health regained by defending
pub fn defense_bonus(defender: &Character) -> i32 {
    (DEFENSE_BASE + defender.agility() / 2).max(0)
}

/// Magnitude of an ability used by `user`
pub fn ability_effect(user: &Character, ability: Ability) -> i32 {
    let value = match ability {
        Ability::Telepathy => user.intelligence(),
        Ability::SuperForce => user.strength() * 2,
        Ability::Regeneration => REGENERATION_HEAL,
        Ability::FirePower => user.strength() + user.intelligence(),
        Ability::Invisibility => 0,
    };
    value.max(0)
}

/// Magnitude of an ability given by id; unknown ids have no effect
pub fn ability_effect_by_id(user: &Character, ability_id: &str) -> i32 {
    Ability::from_id(ability_id)
        .map(|ability| ability_effect(user, ability))
        .unwrap_or(0)
}

/// Remove health. Returns how much was actually removed.
pub fn apply_damage(target: &mut Character, amount: i32) -> i32 {
    let before = target.health();
    target.set_health(before - amount.max(0));
    before - target.health()
}

/// Restore health up to max. Returns how much was actually restored.
pub fn apply_heal(target: &mut Character, amount: i32) -> i32 {
    let before = target.health();
    target.set_health(before + amount.max(0));
    target.health() - before
}
