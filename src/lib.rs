//! Skirmish - turn-based team combat engine
//!
//! Characters with stats and abilities are grouped into teams and armies,
//! then fought against each other round by round under pluggable strategies.
//! All randomness comes from one seedable stream, so a seed replays a battle.

pub mod battle;
pub mod character;
pub mod combat;
pub mod core;
pub mod persist;
pub mod roster;
pub mod team;
