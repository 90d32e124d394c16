//! Combatants: stats, health, experience and granted abilities

pub mod ability;
pub mod builder;
pub mod validation;

pub use ability::{Ability, StatModifiers, POWER_PER_ABILITY};
pub use builder::CharacterBuilder;
pub use validation::{CharacterDraft, ValidationContext, Validator};

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use crate::core::config::GameSettings;
use crate::core::error::ValidationError;
use crate::core::types::CharacterId;

/// Health and max health of a fresh character
pub const BASE_HEALTH: i32 = 100;

/// Experience needed for one level
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// A character shared between the roster and any team nodes holding it
pub type SharedCharacter = Rc<RefCell<Character>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    base_strength: i32,
    base_agility: i32,
    base_intelligence: i32,
    base_max_health: i32,
    health: i32,
    level: u32,
    experience: u32,
    abilities: Vec<Ability>,
}

impl Character {
    /// Raw construction without validation; callers go through the builder
    pub(crate) fn from_base_stats(
        name: impl Into<String>,
        strength: i32,
        agility: i32,
        intelligence: i32,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            base_strength: strength,
            base_agility: agility,
            base_intelligence: intelligence,
            base_max_health: BASE_HEALTH,
            health: BASE_HEALTH,
            level: 1,
            experience: 0,
            abilities: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedCharacter {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> StatModifiers {
        self.abilities.iter().map(|a| a.modifiers()).sum()
    }

    pub fn base_strength(&self) -> i32 {
        self.base_strength
    }

    pub fn base_agility(&self) -> i32 {
        self.base_agility
    }

    pub fn base_intelligence(&self) -> i32 {
        self.base_intelligence
    }

    /// Strength including ability modifiers
    pub fn strength(&self) -> i32 {
        self.base_strength + self.modifiers().strength
    }

    pub fn agility(&self) -> i32 {
        self.base_agility + self.modifiers().agility
    }

    pub fn intelligence(&self) -> i32 {
        self.base_intelligence + self.modifiers().intelligence
    }

    pub fn max_health(&self) -> i32 {
        self.base_max_health + self.modifiers().max_health
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health as a fraction of max health
    pub fn health_fraction(&self) -> f64 {
        let max = self.max_health();
        if max <= 0 {
            return 0.0;
        }
        self.health as f64 / max as f64
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Sum of base stats, the quantity capped at creation time
    pub fn base_stat_total(&self) -> i64 {
        i64::from(self.base_strength) + i64::from(self.base_agility) + i64::from(self.base_intelligence)
    }

    /// Effective stats plus a flat bonus per ability
    pub fn power_level(&self) -> i32 {
        self.strength()
            + self.agility()
            + self.intelligence()
            + POWER_PER_ABILITY * self.abilities.len() as i32
    }

    /// Set health, clamped into `[0, max_health]`
    pub(crate) fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health().max(0));
    }

    /// Back to full health
    pub fn restore(&mut self) {
        self.health = self.max_health();
    }

    /// Add experience, levelling up every 100 points. Returns levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        while self.experience >= EXPERIENCE_PER_LEVEL {
            self.experience -= EXPERIENCE_PER_LEVEL;
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            debug!(character = %self.name, level = self.level, "Level up");
        }
        gained
    }

    /// Attach an ability after checking count and duplicate limits
    pub fn grant_ability(
        &mut self,
        ability: Ability,
        settings: &GameSettings,
    ) -> Result<(), ValidationError> {
        let mut abilities = self.abilities.clone();
        abilities.push(ability);
        let draft = CharacterDraft {
            name: &self.name,
            strength: self.base_strength,
            agility: self.base_agility,
            intelligence: self.base_intelligence,
            abilities: &abilities,
        };
        let context = ValidationContext {
            settings,
            existing_names: &[],
        };
        validation::run(validation::GRANT_VALIDATORS, &draft, &context)?;

        self.abilities.push(ability);
        let bonus = ability.modifiers().max_health;
        if bonus > 0 {
            self.health += bonus;
        }
        debug!(character = %self.name, ability = %ability, "Ability granted");
        Ok(())
    }

    /// Attach abilities during construction; limits were already checked
    pub(crate) fn with_abilities(mut self, abilities: &[Ability]) -> Self {
        for &ability in abilities {
            self.abilities.push(ability);
            self.health += ability.modifiers().max_health.max(0);
        }
        self
    }
}
