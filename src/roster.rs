//! The player's roster of characters
//!
//! The roster owns the shared handles. Teams built from it hold clones of
//! those handles, so experience and abilities gained in battle show up here.

use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::character::{Ability, CharacterBuilder, SharedCharacter};
use crate::core::config::GameSettings;
use crate::core::error::{PersistError, Result, SkirmishError, ValidationError};
use crate::persist::CharacterStore;
use crate::team::TeamNode;

#[derive(Debug, Default)]
pub struct Roster {
    settings: GameSettings,
    characters: Vec<SharedCharacter>,
}

impl Roster {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            characters: Vec::new(),
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Limits can be changed at any time; later checks use the new values
    pub fn settings_mut(&mut self) -> &mut GameSettings {
        &mut self.settings
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedCharacter> {
        self.characters.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.characters
            .iter()
            .map(|c| c.borrow().name().to_string())
            .collect()
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<SharedCharacter> {
        self.characters
            .iter()
            .find(|c| c.borrow().name().eq_ignore_ascii_case(name.trim()))
            .map(Rc::clone)
    }

    /// Validate and add a new character
    pub fn create(
        &mut self,
        builder: &CharacterBuilder,
    ) -> std::result::Result<SharedCharacter, ValidationError> {
        let character = builder.build_shared(&self.settings, &self.names())?;
        info!(character = %character.borrow().name(), "Character created");
        self.characters.push(Rc::clone(&character));
        Ok(character)
    }

    pub fn grant_ability(&self, name: &str, ability: Ability) -> Result<()> {
        let character = self
            .get(name)
            .ok_or_else(|| SkirmishError::CharacterNotFound(name.to_string()))?;
        character
            .borrow_mut()
            .grant_ability(ability, &self.settings)?;
        Ok(())
    }

    /// Bring every character back to full health
    pub fn restore_all(&self) {
        for character in &self.characters {
            character.borrow_mut().restore();
        }
        debug!(count = self.characters.len(), "Roster restored");
    }

    /// Build a team from named roster members
    pub fn team(&self, team_name: &str, members: &[&str]) -> Result<TeamNode> {
        let mut team = TeamNode::team(team_name);
        for member in members {
            let character = self
                .get(member)
                .ok_or_else(|| SkirmishError::CharacterNotFound(member.to_string()))?;
            team.add(TeamNode::character(character), &self.settings)?;
        }
        Ok(team)
    }

    /// Load characters from a store, re-validating each against the current
    /// limits and names. Invalid entries are skipped. Returns how many were
    /// added.
    pub fn import_from(&mut self, store: &dyn CharacterStore) -> std::result::Result<usize, PersistError> {
        let mut imported = 0;
        for loaded in store.load_all()? {
            let builder = CharacterBuilder::new(loaded.name()).stats(
                loaded.base_strength(),
                loaded.base_agility(),
                loaded.base_intelligence(),
            );
            match self.create(&builder) {
                Ok(_) => imported += 1,
                Err(e) => warn!(character = %loaded.name(), "Skipping stored character: {}", e),
            }
        }
        info!(imported, "Roster imported");
        Ok(imported)
    }

    /// Save every character to a store. Returns how many were written.
    pub fn export_to(&self, store: &mut dyn CharacterStore) -> std::result::Result<usize, PersistError> {
        for character in &self.characters {
            store.save(&character.borrow())?;
        }
        Ok(self.characters.len())
    }
}
