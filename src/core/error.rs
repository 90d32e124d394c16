use thiserror::Error;

/// Character creation or ability grant was rejected
///
/// Carries every failing reason found in one validation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid character: {}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Ok when no validator reported anything
    pub fn check(errors: Vec<String>) -> std::result::Result<(), ValidationError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::new(errors))
        }
    }
}

/// A structural edit of a team hierarchy was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Cannot {operation} a member on character '{name}'")]
    Unsupported { operation: &'static str, name: String },

    #[error("'{member}' is already in '{team}'")]
    DuplicateMember { member: String, team: String },

    #[error("A member named '{member}' already exists in '{team}'")]
    NameCollision { member: String, team: String },

    #[error("'{team}' is full (max {capacity} members)")]
    CapacityExceeded { team: String, capacity: usize },
}

/// Battle could not be started
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleSetupError {
    #[error("'{0}' has no combatant able to fight")]
    EmptySide(String),
}

/// Character store failure
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Cannot store character: {0}")]
    InvalidRecord(String),
}

/// Settings could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    BattleSetup(#[from] BattleSetupError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_reason() {
        let err = ValidationError::new(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "Invalid character: first; second");
    }

    #[test]
    fn test_validation_check() {
        assert!(ValidationError::check(Vec::new()).is_ok());
        assert!(ValidationError::check(vec!["bad".into()]).is_err());
    }

    #[test]
    fn test_structural_error_converts() {
        let err: SkirmishError = StructuralError::CapacityExceeded {
            team: "Red".into(),
            capacity: 5,
        }
        .into();
        assert!(matches!(err, SkirmishError::Structural(_)));
    }
}
