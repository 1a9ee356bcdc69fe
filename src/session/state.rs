//! Round and game status values.

use serde::{Deserialize, Serialize};

/// Phase of the current round.
///
/// `Idle -> PlayerTurn -> AiTurn -> ... -> Resolution -> Idle`. Player and
/// AI turns alternate until both sides have stood or busted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    Idle,
    PlayerTurn,
    AiTurn,
    Resolution,
}

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    /// Final encounter cleared.
    Won,
    /// Player HP reached 0.
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Per-round flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub player_stood: bool,
    pub ai_stood: bool,
    /// Rounds started in this encounter.
    pub round_number: u32,
}

impl RoundState {
    /// Clear the flags and return to `Idle`, keeping the round counter.
    pub fn reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.player_stood = false;
        self.ai_stood = false;
    }

    /// Whether both sides are done acting.
    #[must_use]
    pub fn both_stood(&self) -> bool {
        self.player_stood && self.ai_stood
    }
}
