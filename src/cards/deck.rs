//! Deck construction, shuffling and drawing.
//!
//! A `Deck` is an ordered pile where index 0 is the top. It is backed by
//! `im::Vector` so session snapshots clone it in O(1).

use im::Vector;

use super::card::{Card, Suit};
use crate::core::GameRng;

/// Ordered pile of cards. Index 0 is the top.
pub type Deck = Vector<Card>;

/// Cards in a single-suit-set standard deck.
pub const STANDARD_DECK_SIZE: usize = 52;

const FACES: [&str; 3] = ["Jack", "Queen", "King"];

/// Name used for a standard card of the given rank (2-10 numeric, 11-13
/// faces, 1 for the Ace).
#[must_use]
pub fn rank_name(rank: u8, suit: Suit) -> String {
    match rank {
        1 => format!("Ace of {suit}"),
        11..=13 => format!("{} of {suit}", FACES[(rank - 11) as usize]),
        n => format!("{n} of {suit}"),
    }
}

/// Standard card for a rank in 1..=13. Faces are worth 10, the Ace is flexible.
#[must_use]
pub fn standard_card(rank: u8, suit: Suit) -> Card {
    match rank {
        1 => Card::ace(suit),
        11..=13 => Card::standard(10.0, suit, rank_name(rank, suit)),
        n => Card::standard(f64::from(n), suit, rank_name(n, suit)),
    }
}

/// The canonical 52 cards in suit-then-rank order, unshuffled.
#[must_use]
pub fn standard_cards() -> Deck {
    Suit::STANDARD
        .iter()
        .flat_map(|&suit| (2..=13).chain(std::iter::once(1)).map(move |rank| standard_card(rank, suit)))
        .collect()
}

/// Create a shuffled standard 52-card deck.
#[must_use]
pub fn create_standard_deck(rng: &mut GameRng) -> Deck {
    shuffle_deck(&standard_cards(), rng)
}

/// Fisher-Yates shuffle. Returns a new deck; the input is not touched.
#[must_use]
pub fn shuffle_deck(deck: &Deck, rng: &mut GameRng) -> Deck {
    let mut cards: Vec<Card> = deck.iter().cloned().collect();
    rng.shuffle(&mut cards);
    cards.into_iter().collect()
}

/// Draw the top card. Returns `None` on an empty deck; callers own the
/// recycling policy.
pub fn draw_card(deck: &mut Deck) -> Option<Card> {
    deck.pop_front()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardValue;

    #[test]
    fn test_standard_deck_size() {
        let mut rng = GameRng::new(42);
        assert_eq!(create_standard_deck(&mut rng).len(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn test_standard_cards_per_suit() {
        let cards = standard_cards();
        for suit in Suit::STANDARD {
            let in_suit: Vec<_> = cards.iter().filter(|c| c.suit == suit).collect();
            assert_eq!(in_suit.len(), 13);
            assert_eq!(in_suit.iter().filter(|c| c.value == CardValue::Fixed(10.0)).count(), 4);
            assert_eq!(in_suit.iter().filter(|c| c.value.is_flexible()).count(), 1);
        }
    }

    #[test]
    fn test_rank_names() {
        assert_eq!(rank_name(1, Suit::Hearts), "Ace of hearts");
        assert_eq!(rank_name(12, Suit::Clubs), "Queen of clubs");
        assert_eq!(rank_name(7, Suit::Spades), "7 of spades");
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = GameRng::new(42);
        let original = standard_cards();
        let before = original.clone();

        let shuffled = shuffle_deck(&original, &mut rng);

        assert_eq!(original, before);
        assert_ne!(shuffled, original);
        assert_eq!(shuffled.len(), original.len());
    }

    #[test]
    fn test_draw_from_top() {
        let mut deck = standard_cards();
        let top = deck[0].clone();

        let drawn = draw_card(&mut deck);

        assert_eq!(drawn, Some(top));
        assert_eq!(deck.len(), 51);
    }

    #[test]
    fn test_draw_from_empty() {
        let mut deck = Deck::new();
        assert!(draw_card(&mut deck).is_none());
    }
}
