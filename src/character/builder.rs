use crate::character::ability::Ability;
use crate::character::validation::{self, CharacterDraft, ValidationContext};
use crate::character::{Character, SharedCharacter};
use crate::core::config::GameSettings;
use crate::core::error::ValidationError;

/// Collects character fields and validates them in one pass
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    name: String,
    strength: i32,
    agility: i32,
    intelligence: i32,
    abilities: Vec<Ability>,
}

impl Default for CharacterBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            strength: 10,
            agility: 10,
            intelligence: 10,
            abilities: Vec::new(),
        }
    }
}

impl CharacterBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn strength(mut self, value: i32) -> Self {
        self.strength = value;
        self
    }

    pub fn agility(mut self, value: i32) -> Self {
        self.agility = value;
        self
    }

    pub fn intelligence(mut self, value: i32) -> Self {
        self.intelligence = value;
        self
    }

    pub fn stats(self, strength: i32, agility: i32, intelligence: i32) -> Self {
        self.strength(strength)
            .agility(agility)
            .intelligence(intelligence)
    }

    pub fn ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Validate and construct. Nothing is created when any check fails.
    pub fn build(
        &self,
        settings: &GameSettings,
        existing_names: &[String],
    ) -> Result<Character, ValidationError> {
        let draft = CharacterDraft {
            name: &self.name,
            strength: self.strength,
            agility: self.agility,
            intelligence: self.intelligence,
            abilities: &self.abilities,
        };
        let context = ValidationContext {
            settings,
            existing_names,
        };
        validation::run(validation::CREATION_VALIDATORS, &draft, &context)?;

        Ok(Character::from_base_stats(
            self.name.trim(),
            self.strength,
            self.agility,
            self.intelligence,
        )
        .with_abilities(&self.abilities))
    }

    pub fn build_shared(
        &self,
        settings: &GameSettings,
        existing_names: &[String],
    ) -> Result<SharedCharacter, ValidationError> {
        self.build(settings, existing_names).map(Character::into_shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = CharacterBuilder::new("Default")
            .build(&GameSettings::default(), &[])
            .unwrap();
        assert_eq!(c.base_strength(), 10);
        assert_eq!(c.base_agility(), 10);
        assert_eq!(c.base_intelligence(), 10);
    }

    #[test]
    fn test_build_with_regeneration() {
        let c = CharacterBuilder::new("Troll")
            .stats(20, 5, 5)
            .ability(Ability::Regeneration)
            .build(&GameSettings::default(), &[])
            .unwrap();
        assert_eq!(c.max_health(), 150);
        assert_eq!(c.health(), 150);
    }

    #[test]
    fn test_name_is_trimmed() {
        let c = CharacterBuilder::new("  Mira ")
            .build(&GameSettings::default(), &[])
            .unwrap();
        assert_eq!(c.name(), "Mira");
    }

    #[test]
    fn test_invalid_build_reports_errors() {
        let err = CharacterBuilder::new("Greedy")
            .stats(30, 30, 30)
            .build(&GameSettings::default(), &[])
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.errors[0].contains("90"));
    }

    #[test]
    fn test_huge_stat_rejected() {
        let err = CharacterBuilder::new("Big")
            .stats(i32::MAX, 1, 1)
            .build(&GameSettings::default(), &[])
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.errors[0].contains("2147483649"));
    }

    #[test]
    fn test_settings_change_applies_to_later_builds() {
        let mut settings = GameSettings::default();
        let builder = CharacterBuilder::new("Tank").stats(30, 20, 10);
        assert!(builder.build(&settings, &[]).is_err());
        settings.max_stat_points = 60;
        assert!(builder.build(&settings, &[]).is_ok());
    }
}
