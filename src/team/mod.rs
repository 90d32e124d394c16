//! Team hierarchy: characters grouped into teams, teams into armies

pub mod node;
pub mod observer;

pub use node::{CharacterLeaf, CompositeKind, NodeKind, OutlineLine, TeamComposite, TeamNode};
pub use observer::{CombatLogger, LogEntry, TeamEvent, TeamObserver};
