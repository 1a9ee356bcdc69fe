//! Hit-or-stand decisions for the AI.

use super::archetype::Archetype;
use crate::core::GameRng;
use crate::rules::BLACKJACK;

/// Lowest stand threshold the chase adjustment can produce.
pub const MIN_STAND_THRESHOLD: u8 = 12;

/// Player totals in `(CHASE_LOW, 21]` look strong to the AI.
const CHASE_LOW: f64 = 17.0;

/// Inputs to one AI decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionContext {
    /// Cards in the AI's hand.
    pub hand_size: usize,
    pub ai_total: f64,
    /// The player's visible total.
    pub player_total: f64,
    /// 1-based encounter index.
    pub encounter: u32,
}

/// Decide whether the AI hits.
///
/// - Never hits at 21 or above.
/// - Always hits below two cards.
/// - Otherwise hits while under the archetype's stand threshold. Against a
///   strong-looking player total, risk-tolerant archetypes (> 0.5) shift the
///   threshold down by one, floored at 12.
pub fn should_hit(ctx: &DecisionContext, rng: &mut GameRng) -> bool {
    if ctx.ai_total >= BLACKJACK {
        return false;
    }
    if ctx.hand_size < 2 {
        return true;
    }

    let archetype = Archetype::for_encounter(ctx.encounter);
    let mut threshold = archetype.stand_threshold().roll(rng);
    let risk = archetype.risk_tolerance().roll(rng);

    let player_strong = ctx.player_total > CHASE_LOW && ctx.player_total <= BLACKJACK;
    if player_strong && risk > 0.5 {
        threshold = threshold.saturating_sub(1).max(MIN_STAND_THRESHOLD);
    }

    ctx.ai_total < f64::from(threshold)
}
