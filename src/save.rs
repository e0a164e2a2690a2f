use serde::{Deserialize, Serialize};

use crate::board::{Board, SolutionBoard};
use crate::difficulty::Difficulty;

/// Everything needed to resume a game. The board keeps given-ness per cell,
/// so the initial puzzle survives persistence without being re-derived from
/// the player's entries. Elapsed time is UI bookkeeping carried along for the
/// round trip.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub solution: SolutionBoard,
    pub difficulty: Difficulty,
    pub elapsed_secs: u64,
    pub hints_remaining: u32,
    pub mistakes: u32,
}

impl SavedGame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}
