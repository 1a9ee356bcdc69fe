//! Round outcome table and exact-21 suit bonuses.
//!
//! Pure functions: given final totals they say who won and how much damage
//! and chips change hands. Applying the result to a session is the job of
//! the session's resolution step.

use serde::{Deserialize, Serialize};

use super::hand::{is_bust, BLACKJACK};
use crate::cards::Suit;

/// Who won a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundWinner {
    Player,
    Ai,
    Tie,
}

/// Which row of the outcome table applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeReason {
    AutoWin,
    BothBust,
    PlayerBust,
    AiBust,
    PlayerHigher,
    AiHigher,
    Push,
}

/// Result of comparing two final hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: RoundWinner,
    pub reason: OutcomeReason,
    /// Damage the player takes, before shield absorption.
    pub damage_to_player: i32,
    pub damage_to_ai: i32,
    /// Chips the player earns for the round.
    pub chips_earned: u32,
    /// Whether the player's bonus damage went into `damage_to_ai`.
    pub bonus_spent: bool,
}

/// Round a fractional damage value up to whole HP.
#[must_use]
pub fn damage_points(amount: f64) -> i32 {
    amount.max(0.0).ceil() as i32
}

/// Apply the outcome table.
///
/// Rows in priority order: auto-win, both bust, player bust, AI bust,
/// player higher, AI higher, push.
#[must_use]
pub fn resolve_outcome(
    player_total: f64,
    ai_total: f64,
    bonus_damage: i32,
    auto_win: bool,
    win_chips: u32,
) -> RoundOutcome {
    let player_wins = |reason, base: f64| RoundOutcome {
        winner: RoundWinner::Player,
        reason,
        damage_to_player: 0,
        damage_to_ai: damage_points(base) + bonus_damage,
        chips_earned: win_chips,
        bonus_spent: true,
    };
    let ai_wins = |reason, base: f64| RoundOutcome {
        winner: RoundWinner::Ai,
        reason,
        damage_to_player: damage_points(base),
        damage_to_ai: 0,
        chips_earned: 0,
        bonus_spent: false,
    };
    let tie = |reason| RoundOutcome {
        winner: RoundWinner::Tie,
        reason,
        damage_to_player: 0,
        damage_to_ai: 0,
        chips_earned: 0,
        bonus_spent: false,
    };

    if auto_win {
        let base = if is_bust(ai_total) { BLACKJACK } else { BLACKJACK - ai_total };
        return player_wins(OutcomeReason::AutoWin, base);
    }

    match (is_bust(player_total), is_bust(ai_total)) {
        (true, true) => tie(OutcomeReason::BothBust),
        (true, false) => ai_wins(OutcomeReason::PlayerBust, ai_total),
        (false, true) => player_wins(OutcomeReason::AiBust, player_total),
        (false, false) => {
            if player_total > ai_total {
                player_wins(OutcomeReason::PlayerHigher, player_total - ai_total)
            } else if ai_total > player_total {
                ai_wins(OutcomeReason::AiHigher, ai_total - player_total)
            } else {
                tie(OutcomeReason::Push)
            }
        }
    }
}

/// Bonus granted when the player finishes on exactly 21.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitBonus {
    /// Hearts: heal.
    Heal,
    /// Diamonds: chips.
    Chips,
    /// Clubs: bonus damage next round.
    BonusDamage,
    /// Spades: shield.
    Shield,
}

/// Suit bonus for the last card of an exact-21 hand, if any.
#[must_use]
pub fn suit_bonus(suit: Suit) -> Option<SuitBonus> {
    match suit {
        Suit::Hearts => Some(SuitBonus::Heal),
        Suit::Diamonds => Some(SuitBonus::Chips),
        Suit::Clubs => Some(SuitBonus::BonusDamage),
        Suit::Spades => Some(SuitBonus::Shield),
        Suit::Special | Suit::Business | Suit::Tarot => None,
    }
}

impl RoundOutcome {
    /// One-line summary for the round result banner.
    #[must_use]
    pub fn summary(&self, player_total: f64, ai_total: f64) -> String {
        match self.reason {
            OutcomeReason::AutoWin => format!("Auto-win! You deal {} damage.", self.damage_to_ai),
            OutcomeReason::BothBust => "Both busted. No damage.".to_string(),
            OutcomeReason::PlayerBust => {
                format!("You busted with {player_total}. You take {} damage.", self.damage_to_player)
            }
            OutcomeReason::AiBust => {
                format!("Opponent busted with {ai_total}. You deal {} damage.", self.damage_to_ai)
            }
            OutcomeReason::PlayerHigher => format!(
                "You win {player_total} to {ai_total}. You deal {} damage.",
                self.damage_to_ai
            ),
            OutcomeReason::AiHigher => format!(
                "Opponent wins {ai_total} to {player_total}. You take {} damage.",
                self.damage_to_player
            ),
            OutcomeReason::Push => format!("Push at {player_total}. No damage."),
        }
    }
}
