//! Card records.
//!
//! A `Card` is immutable once built. Per-play state (a rolled value, whether
//! its effect has fired) lives on `PlayedCard` in the hand, never here.

use serde::{Deserialize, Serialize};

use crate::effects::CardEffect;

/// Card suit.
///
/// The four standard suits drive the exact-21 bonus. Non-standard card
/// families carry their own suit and never earn a suit bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Special,
    Business,
    Tarot,
}

impl Suit {
    /// The four standard suits, in deck-building order.
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Whether this is one of the four standard suits.
    #[must_use]
    pub const fn is_standard(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds | Suit::Clubs | Suit::Spades)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
            Suit::Special => "special",
            Suit::Business => "business",
            Suit::Tarot => "tarot",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card family. Used for shop categorization only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Standard,
    Tarot,
    Business,
    Special,
}

/// A card's point value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardValue {
    /// Fixed contribution. May be fractional or negative.
    Fixed(f64),
    /// Two alternatives; the evaluator takes `high` if the hand stays at or
    /// under 21, otherwise `low`.
    Flexible { low: f64, high: f64 },
}

impl CardValue {
    /// The usual Ace value.
    pub const ACE: CardValue = CardValue::Flexible { low: 1.0, high: 11.0 };

    /// Whether the value is a two-way alternative.
    #[must_use]
    pub const fn is_flexible(&self) -> bool {
        matches!(self, CardValue::Flexible { .. })
    }

    /// Lowest value the card can contribute.
    #[must_use]
    pub fn low(&self) -> f64 {
        match *self {
            CardValue::Fixed(v) => v,
            CardValue::Flexible { low, .. } => low,
        }
    }
}

/// An immutable card.
///
/// ## Example
///
/// ```
/// use blackjack_battler::cards::{Card, CardType, CardValue, Suit};
///
/// let seven = Card::standard(7.0, Suit::Clubs, "7 of clubs");
/// assert_eq!(seven.value, CardValue::Fixed(7.0));
/// assert_eq!(seven.card_type, CardType::Standard);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub value: CardValue,
    pub suit: Suit,
    pub card_type: CardType,
    pub name: String,
    pub description: Option<String>,
    pub effect: Option<CardEffect>,
}

impl Card {
    /// Create a card with no description or effect.
    #[must_use]
    pub fn new(name: impl Into<String>, value: CardValue, suit: Suit, card_type: CardType) -> Self {
        Self {
            value,
            suit,
            card_type,
            name: name.into(),
            description: None,
            effect: None,
        }
    }

    /// Create a standard fixed-value card.
    #[must_use]
    pub fn standard(value: f64, suit: Suit, name: impl Into<String>) -> Self {
        Self::new(name, CardValue::Fixed(value), suit, CardType::Standard)
    }

    /// Create a standard Ace (1 or 11).
    #[must_use]
    pub fn ace(suit: Suit) -> Self {
        Self::new(format!("Ace of {suit}"), CardValue::ACE, suit, CardType::Standard)
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Whether the card belongs to a non-standard family.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.card_type != CardType::Standard
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
