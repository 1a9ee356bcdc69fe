//! Hands and the hand evaluator.
//!
//! ## Evaluation
//!
//! 1. Fixed-value cards are summed first, including negative and fractional
//!    values, rolled values and hand modifiers.
//! 2. Flexible cards (value pairs such as the Ace) are then resolved in hand
//!    order: each takes its high value if the running total stays at or
//!    under 21, otherwise its low value.
//! 3. A hand holding a fired auto-win card counts as exactly 21.
//!
//! Flexible cards are detected by the shape of their value, never by name.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardValue};
use crate::effects::{EffectKind, EffectTrigger};

/// Blackjack target.
pub const BLACKJACK: f64 = 21.0;

/// A card as played into a hand, with its per-play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    /// Value rolled by a random-value effect for this play.
    pub rolled_value: Option<f64>,
    /// Whether the card's effect has fired during this play.
    pub effect_fired: bool,
}

impl PlayedCard {
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            card,
            rolled_value: None,
            effect_fired: false,
        }
    }

    /// Effective value for this play.
    #[must_use]
    pub fn value(&self) -> CardValue {
        match self.rolled_value {
            Some(v) => CardValue::Fixed(v),
            None => self.card.value,
        }
    }

    /// Whether an auto-win effect on this card has fired.
    #[must_use]
    pub fn is_auto_win(&self) -> bool {
        self.effect_fired
            && self
                .card
                .effect
                .as_ref()
                .is_some_and(|e| e.kind == EffectKind::AutoWin)
    }

    /// Hand-total modifier contributed while the card is in hand.
    #[must_use]
    pub fn hand_modifier(&self) -> f64 {
        match &self.card.effect {
            Some(effect) => match effect.kind {
                EffectKind::ModifyHandTotal { amount } => {
                    let active = effect.trigger == EffectTrigger::Persistent || self.effect_fired;
                    if active { amount } else { 0.0 }
                }
                _ => 0.0,
            },
            None => 0.0,
        }
    }
}

impl From<Card> for PlayedCard {
    fn from(card: Card) -> Self {
        Self::new(card)
    }
}

/// Compute a hand's blackjack total.
///
/// ```
/// use blackjack_battler::cards::{Card, Suit};
/// use blackjack_battler::rules::{calculate_total, PlayedCard};
///
/// let hand: Vec<PlayedCard> = vec![Card::ace(Suit::Hearts).into(), Card::standard(5.0, Suit::Clubs, "5 of clubs").into()];
/// assert_eq!(calculate_total(&hand), 16.0);
/// ```
#[must_use]
pub fn calculate_total(cards: &[PlayedCard]) -> f64 {
    calculate_total_with_bonus(cards, 0.0)
}

/// Compute a hand's total with an external bonus (e.g. summons) folded into
/// the fixed sum before flexible cards are resolved.
#[must_use]
pub fn calculate_total_with_bonus(cards: &[PlayedCard], bonus: f64) -> f64 {
    if cards.is_empty() {
        return 0.0;
    }
    if cards.iter().any(PlayedCard::is_auto_win) {
        return BLACKJACK;
    }

    let mut total = bonus;
    for played in cards {
        if let CardValue::Fixed(v) = played.value() {
            total += v;
        }
        total += played.hand_modifier();
    }

    for played in cards {
        if let CardValue::Flexible { low, high } = played.value() {
            total += if total + high <= BLACKJACK { high } else { low };
        }
    }

    total
}

/// Whether a total is a bust.
#[must_use]
pub fn is_bust(total: f64) -> bool {
    total > BLACKJACK
}

/// The cards a combatant has played this round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[PlayedCard; 8]>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from plain cards (no per-play state).
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().map(PlayedCard::new).collect(),
        }
    }

    pub fn push(&mut self, card: PlayedCard) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[PlayedCard] {
        &self.cards
    }

    #[must_use]
    pub fn last(&self) -> Option<&PlayedCard> {
        self.cards.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut PlayedCard> {
        self.cards.last_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PlayedCard> {
        self.cards.get_mut(index)
    }

    /// Remove and return the most recently played card.
    pub fn pop(&mut self) -> Option<PlayedCard> {
        self.cards.pop()
    }

    /// Empty the hand, returning the underlying cards in play order.
    pub fn take_cards(&mut self) -> Vec<Card> {
        self.cards.drain(..).map(|p| p.card).collect()
    }

    /// Total without external bonuses.
    #[must_use]
    pub fn total(&self) -> f64 {
        calculate_total(&self.cards)
    }

    /// Whether any fired auto-win card is in the hand.
    #[must_use]
    pub fn has_auto_win(&self) -> bool {
        self.cards.iter().any(PlayedCard::is_auto_win)
    }
}
