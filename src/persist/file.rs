use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::character::Character;
use crate::core::error::PersistError;
use crate::persist::{format_line, parse_line, CharacterStore};

/// Append-only flat file store
#[derive(Debug, Clone)]
pub struct FileCharacterStore {
    path: PathBuf,
}

impl FileCharacterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CharacterStore for FileCharacterStore {
    fn save(&mut self, character: &Character) -> Result<(), PersistError> {
        let line = format_line(character)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        debug!(path = %self.path.display(), character = %character.name(), "Character saved");
        Ok(())
    }

    /// Missing file loads as empty; malformed lines are skipped
    fn load_all(&self) -> Result<Vec<Character>, PersistError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut characters = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(character) => characters.push(character),
                None => warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    "Skipping malformed character line: {}",
                    line
                ),
            }
        }
        Ok(characters)
    }
}
