//! Append-only action history
//!
//! Each committed action is stored next to the record taken when it was
//! committed. Records can be rendered or exported at any time without
//! touching a character. Re-executing the stored actions is a separate,
//! explicitly impure operation.

use rand::RngCore;

use crate::combat::{Action, ActionOutcome, ActionRecord};

#[derive(Debug, Clone, Default)]
pub struct ActionHistory {
    entries: Vec<(Action, ActionRecord)>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an action, snapshotting its record now
    pub fn push(&mut self, action: Action) {
        let record = action.to_record();
        self.entries.push((action, record));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Action, ActionRecord)> {
        self.entries.iter()
    }

    pub fn records(&self) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    /// Render every record in order. Never mutates state.
    pub fn render_records(&self) -> Vec<String> {
        self.records().map(ActionRecord::render).collect()
    }

    /// Records as pretty JSON
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        let records: Vec<&ActionRecord> = self.records().collect();
        serde_json::to_string_pretty(&records)
    }

    /// Execute every stored action again against live characters.
    ///
    /// Draws fresh randomness and applies new damage; outcomes only match
    /// the original run if `rng` is reset to the seed the battle used.
    pub fn replay_with_side_effects(&self, rng: &mut dyn RngCore) -> Vec<ActionOutcome> {
        self.entries
            .iter()
            .map(|(action, _)| action.execute(&mut *rng))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
