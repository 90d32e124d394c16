//! Combat resolution: formulas and the actions built on them

pub mod action;
pub mod engine;

pub use action::{Action, ActionKind, ActionOutcome, ActionRecord};
pub use engine::{
    ability_effect, ability_effect_by_id, apply_damage, apply_heal, defense_bonus, roll_attack,
    AttackRoll,
};
