use crate::character::Character;
use crate::core::error::PersistError;
use crate::core::types::CharacterId;
use crate::persist::CharacterStore;

/// In-memory store keyed by character id
#[derive(Debug, Clone, Default)]
pub struct MemoryCharacterStore {
    characters: Vec<Character>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.characters.len()
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id() == id)
    }

    /// Case-insensitive lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn remove(&mut self, id: CharacterId) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.id() != id);
        self.characters.len() != before
    }

    pub fn sorted_by_name(&self) -> Vec<&Character> {
        let mut sorted: Vec<&Character> = self.characters.iter().collect();
        sorted.sort_by_key(|c| c.name().to_lowercase());
        sorted
    }

    /// Strongest first
    pub fn sorted_by_power(&self) -> Vec<&Character> {
        let mut sorted: Vec<&Character> = self.characters.iter().collect();
        sorted.sort_by(|a, b| b.power_level().cmp(&a.power_level()));
        sorted
    }

    /// Highest level first
    pub fn sorted_by_level(&self) -> Vec<&Character> {
        let mut sorted: Vec<&Character> = self.characters.iter().collect();
        sorted.sort_by(|a, b| b.level().cmp(&a.level()));
        sorted
    }
}

impl CharacterStore for MemoryCharacterStore {
    /// Saving an id already present replaces it
    fn save(&mut self, character: &Character) -> Result<(), PersistError> {
        match self.characters.iter_mut().find(|c| c.id() == character.id()) {
            Some(existing) => *existing = character.clone(),
            None => self.characters.push(character.clone()),
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Character>, PersistError> {
        Ok(self.characters.clone())
    }
}
