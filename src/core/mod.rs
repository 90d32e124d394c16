pub mod config;
pub mod error;
pub mod types;

pub use config::{BattleConfig, GameSettings, SkirmishConfig};
pub use error::{
    BattleSetupError, ConfigError, PersistError, Result, SkirmishError, StructuralError,
    ValidationError,
};
pub use types::{now_millis, CharacterId, NodeId, Round, Side};
