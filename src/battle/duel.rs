//! Quick one-on-one exchange: an attack and, if the target is still standing,
//! a counter-attack.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::character::SharedCharacter;
use crate::combat::{Action, ActionOutcome};

/// Experience for the duel winner
pub const DUEL_WIN_EXPERIENCE: u32 = 30;

/// Experience for each side of a tied duel
pub const DUEL_TIE_EXPERIENCE: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelReport {
    pub attack: ActionOutcome,
    pub counter: Option<ActionOutcome>,
    /// None on a tie
    pub winner: Option<String>,
    pub challenger_health: i32,
    pub defender_health: i32,
}

pub fn duel(
    challenger: &SharedCharacter,
    defender: &SharedCharacter,
    rng: &mut dyn RngCore,
) -> DuelReport {
    let attack = Action::attack(challenger, defender).execute(rng);

    let counter = if defender.borrow().is_alive() {
        Some(Action::attack(defender, challenger).execute(rng))
    } else {
        None
    };

    let challenger_health = challenger.borrow().health();
    let defender_health = defender.borrow().health();

    let winner = match challenger_health.cmp(&defender_health) {
        std::cmp::Ordering::Greater => Some(challenger),
        std::cmp::Ordering::Less => Some(defender),
        std::cmp::Ordering::Equal => None,
    };

    let winner_name = match winner {
        Some(winner) => {
            let mut w = winner.borrow_mut();
            w.add_experience(DUEL_WIN_EXPERIENCE);
            Some(w.name().to_string())
        }
        None => {
            challenger.borrow_mut().add_experience(DUEL_TIE_EXPERIENCE);
            defender.borrow_mut().add_experience(DUEL_TIE_EXPERIENCE);
            None
        }
    };

    info!(
        winner = winner_name.as_deref().unwrap_or("tie"),
        challenger_health, defender_health, "Duel finished"
    );

    DuelReport {
        attack,
        counter,
        winner: winner_name,
        challenger_health,
        defender_health,
    }
}
