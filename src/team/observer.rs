//! Team observers
//!
//! Observers are told about structural edits and battle milestones on the
//! composite they are subscribed to. Delivery is synchronous, in
//! subscription order.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use tracing::info;

use crate::core::types::now_millis;
use crate::team::node::TeamComposite;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamEvent {
    MemberAdded { member: String },
    MemberRemoved { member: String },
    BattleStarted { opponent: String },
    KnockedOut { character: String },
    BattleEnded { result: String },
}

impl fmt::Display for TeamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamEvent::MemberAdded { member } => write!(f, "{} joined", member),
            TeamEvent::MemberRemoved { member } => write!(f, "{} left", member),
            TeamEvent::BattleStarted { opponent } => write!(f, "Battle started against {}", opponent),
            TeamEvent::KnockedOut { character } => write!(f, "{} was knocked out", character),
            TeamEvent::BattleEnded { result } => write!(f, "Battle ended: {}", result),
        }
    }
}

pub trait TeamObserver {
    fn receive(&self, team: &TeamComposite, event: &TeamEvent);
}

/// One line recorded by the combat logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp_ms: u64,
    pub team: Option<String>,
    pub message: String,
}

/// Observer that keeps a timestamped log and mirrors it to tracing
#[derive(Debug, Default)]
pub struct CombatLogger {
    entries: RefCell<Vec<LogEntry>>,
}

impl CombatLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a free-form combat message
    pub fn log_combat_event(&self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "skirmish::combat_log", "{}", message);
        self.push(None, message);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn push(&self, team: Option<String>, message: String) {
        self.entries.borrow_mut().push(LogEntry {
            timestamp_ms: now_millis(),
            team,
            message,
        });
    }
}

impl TeamObserver for CombatLogger {
    fn receive(&self, team: &TeamComposite, event: &TeamEvent) {
        let message = event.to_string();
        info!(target: "skirmish::combat_log", team = %team.name(), "{}", message);
        self.push(Some(team.name().to_string()), message);
    }
}
