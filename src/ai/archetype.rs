//! AI archetypes.
//!
//! Four behavioral profiles cycle with the encounter index:
//!
//! | Index | Archetype  | Stand at  | Risk      | Deck             |
//! |-------|------------|-----------|-----------|------------------|
//! | 0     | Novice     | 16        | 0.3       | standard         |
//! | 1     | Aggressive | 18        | 0.7       | high-value skew  |
//! | 2     | Defensive  | 14        | 0.2       | mid-value skew   |
//! | 3     | Dog        | 15-19 rnd | random    | low cards, aces  |

use serde::{Deserialize, Serialize};

use crate::cards::{shuffle_deck, standard_card, Deck, Suit};
use crate::core::GameRng;

/// AI behavioral profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Novice,
    Aggressive,
    Defensive,
    Dog,
}

/// Total at which the AI stops hitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandThreshold {
    Fixed(u8),
    /// Rolled per decision, inclusive.
    Random { low: u8, high: u8 },
}

/// Appetite for chasing a strong-looking opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RiskTolerance {
    Fixed(f64),
    /// Rolled per decision in `[0, 1)`.
    Random,
}

// Ranks per suit (1 = Ace, 11-13 = faces). Each list has 13 entries.
const NOVICE_RANKS: [u8; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 1];
const AGGRESSIVE_RANKS: [u8; 13] = [6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 1];
const DEFENSIVE_RANKS: [u8; 13] = [4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 1];
const DOG_RANKS: [u8; 13] = [2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 1, 1];

impl Archetype {
    /// Archetype for a 1-based encounter index.
    #[must_use]
    pub fn for_encounter(encounter: u32) -> Self {
        match encounter.saturating_sub(1) % 4 {
            0 => Archetype::Novice,
            1 => Archetype::Aggressive,
            2 => Archetype::Defensive,
            _ => Archetype::Dog,
        }
    }

    #[must_use]
    pub fn stand_threshold(self) -> StandThreshold {
        match self {
            Archetype::Novice => StandThreshold::Fixed(16),
            Archetype::Aggressive => StandThreshold::Fixed(18),
            Archetype::Defensive => StandThreshold::Fixed(14),
            Archetype::Dog => StandThreshold::Random { low: 15, high: 19 },
        }
    }

    #[must_use]
    pub fn risk_tolerance(self) -> RiskTolerance {
        match self {
            Archetype::Novice => RiskTolerance::Fixed(0.3),
            Archetype::Aggressive => RiskTolerance::Fixed(0.7),
            Archetype::Defensive => RiskTolerance::Fixed(0.2),
            Archetype::Dog => RiskTolerance::Random,
        }
    }

    /// Display name of the opponent.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Novice => "Novice",
            Archetype::Aggressive => "Aggressive",
            Archetype::Defensive => "Defensive",
            Archetype::Dog => "Dog",
        }
    }

    fn ranks(self) -> &'static [u8; 13] {
        match self {
            Archetype::Novice => &NOVICE_RANKS,
            Archetype::Aggressive => &AGGRESSIVE_RANKS,
            Archetype::Defensive => &DEFENSIVE_RANKS,
            Archetype::Dog => &DOG_RANKS,
        }
    }

    /// Unshuffled 52-card deck for this archetype.
    #[must_use]
    pub fn deck_cards(self) -> Deck {
        let ranks = self.ranks();
        Suit::STANDARD
            .iter()
            .flat_map(|&suit| ranks.iter().map(move |&rank| standard_card(rank, suit)))
            .collect::<Deck>()
    }

    /// Shuffled 52-card deck for this archetype.
    #[must_use]
    pub fn build_deck(self, rng: &mut GameRng) -> Deck {
        shuffle_deck(&self.deck_cards(), rng)
    }
}

impl StandThreshold {
    /// Resolve to a concrete total for one decision.
    pub fn roll(self, rng: &mut GameRng) -> u8 {
        match self {
            StandThreshold::Fixed(t) => t,
            StandThreshold::Random { low, high } => {
                rng.gen_range_inclusive(i32::from(low), i32::from(high)) as u8
            }
        }
    }
}

impl RiskTolerance {
    /// Resolve to a concrete value for one decision.
    pub fn roll(self, rng: &mut GameRng) -> f64 {
        match self {
            RiskTolerance::Fixed(r) => r,
            RiskTolerance::Random => rng.gen_unit(),
        }
    }
}
