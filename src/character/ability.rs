//! The closed table of five abilities
//!
//! A granted ability is a record on the character that contributes additive
//! stat modifiers. There are no wrapper layers; the character sums the
//! modifiers of everything it holds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Power level contributed by each distinct ability
pub const POWER_PER_ABILITY: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Invisibility,
    Telepathy,
    SuperForce,
    Regeneration,
    FirePower,
}

impl Ability {
    pub const ALL: [Ability; 5] = [
        Ability::Invisibility,
        Ability::Telepathy,
        Ability::SuperForce,
        Ability::Regeneration,
        Ability::FirePower,
    ];

    /// Canonical identifier, as stored in action records
    pub fn id(self) -> &'static str {
        match self {
            Ability::Invisibility => "Invisibility",
            Ability::Telepathy => "Telepathy",
            Ability::SuperForce => "Super Force",
            Ability::Regeneration => "Regeneration",
            Ability::FirePower => "Fire Power",
        }
    }

    /// Look up an ability by id (case-insensitive, spaces optional)
    pub fn from_id(id: &str) -> Option<Ability> {
        let normalized = id.trim().to_lowercase();
        match normalized.as_str() {
            "invisibility" => Some(Ability::Invisibility),
            "telepathy" => Some(Ability::Telepathy),
            "super force" | "superforce" => Some(Ability::SuperForce),
            "regeneration" => Some(Ability::Regeneration),
            "fire power" | "firepower" => Some(Ability::FirePower),
            _ => None,
        }
    }

    /// Stat modifiers granted while the ability is held
    pub fn modifiers(self) -> StatModifiers {
        match self {
            Ability::Invisibility => StatModifiers {
                agility: 5,
                ..StatModifiers::default()
            },
            Ability::Telepathy => StatModifiers {
                intelligence: 5,
                ..StatModifiers::default()
            },
            Ability::SuperForce => StatModifiers {
                strength: 8,
                ..StatModifiers::default()
            },
            Ability::Regeneration => StatModifiers {
                max_health: 50,
                ..StatModifiers::default()
            },
            Ability::FirePower => StatModifiers {
                strength: 3,
                intelligence: 3,
                ..StatModifiers::default()
            },
        }
    }

    /// Abilities whose effect lands on the opponent
    pub fn is_offensive(self) -> bool {
        matches!(
            self,
            Ability::Telepathy | Ability::SuperForce | Ability::FirePower
        )
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Ability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::from_id(s).ok_or_else(|| format!("Unknown ability: {}", s))
    }
}

/// Additive stat bonuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub max_health: i32,
}

impl Add for StatModifiers {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            strength: self.strength + rhs.strength,
            agility: self.agility + rhs.agility,
            intelligence: self.intelligence + rhs.intelligence,
            max_health: self.max_health + rhs.max_health,
        }
    }
}

impl Sum for StatModifiers {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(StatModifiers::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for ability in Ability::ALL {
            assert_eq!(Ability::from_id(ability.id()), Some(ability));
        }
    }

    #[test]
    fn test_lookup_is_lenient() {
        assert_eq!(Ability::from_id("FIREPOWER"), Some(Ability::FirePower));
        assert_eq!(Ability::from_id("telepathy"), Some(Ability::Telepathy));
        assert_eq!(Ability::from_id("  super force "), Some(Ability::SuperForce));
        assert_eq!(Ability::from_id("Time Travel"), None);
    }

    #[test]
    fn test_modifiers_sum() {
        let total: StatModifiers = [Ability::SuperForce, Ability::FirePower, Ability::Regeneration]
            .iter()
            .map(|a| a.modifiers())
            .sum();
        assert_eq!(total.strength, 11);
        assert_eq!(total.intelligence, 3);
        assert_eq!(total.max_health, 50);
        assert_eq!(total.agility, 0);
    }

    #[test]
    fn test_offensive_set() {
        let offensive: Vec<Ability> = Ability::ALL.into_iter().filter(|a| a.is_offensive()).collect();
        assert_eq!(
            offensive,
            vec![Ability::Telepathy, Ability::SuperForce, Ability::FirePower]
        );
    }
}
