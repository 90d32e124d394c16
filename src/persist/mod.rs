//! Character persistence
//!
//! Only base stats survive a round trip: one `name;strength;agility;intelligence`
//! line per character. Health, level, experience and abilities are not stored.

pub mod file;
pub mod memory;

pub use file::FileCharacterStore;
pub use memory::MemoryCharacterStore;

use crate::character::Character;
use crate::core::error::PersistError;

/// Field separator of the flat format
pub const FIELD_SEPARATOR: char = ';';

pub trait CharacterStore {
    fn save(&mut self, character: &Character) -> Result<(), PersistError>;

    fn load_all(&self) -> Result<Vec<Character>, PersistError>;
}

/// Encode a character as one line (without the newline)
pub fn format_line(character: &Character) -> Result<String, PersistError> {
    let name = character.name();
    if name.contains(FIELD_SEPARATOR) || name.contains('\n') {
        return Err(PersistError::InvalidRecord(format!(
            "name '{}' contains a reserved character",
            name
        )));
    }
    Ok(format!(
        "{name}{sep}{}{sep}{}{sep}{}",
        character.base_strength(),
        character.base_agility(),
        character.base_intelligence(),
        sep = FIELD_SEPARATOR
    ))
}

/// Decode one line; None when it is malformed
pub fn parse_line(line: &str) -> Option<Character> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    let [name, strength, agility, intelligence] = fields.as_slice() else {
        return None;
    };
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Character::from_base_stats(
        name,
        strength.trim().parse().ok()?,
        agility.trim().parse().ok()?,
        intelligence.trim().parse().ok()?,
    ))
}
