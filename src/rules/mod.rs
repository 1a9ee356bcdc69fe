//! Blackjack rules: hand evaluation and the round outcome table.
//!
//! Both are pure. The session applies their results to combatants.

pub mod hand;
pub mod outcome;

pub use hand::{calculate_total, calculate_total_with_bonus, is_bust, Hand, PlayedCard, BLACKJACK};
pub use outcome::{
    damage_points, resolve_outcome, suit_bonus, OutcomeReason, RoundOutcome, RoundWinner, SuitBonus,
};
