//! Combatants: the player and the AI.
//!
//! ## Side
//!
//! Two-sided identifier with `opponent()`.
//!
//! ## Combatant
//!
//! HP, piles (deck, hand, discard) and persistent status effects. HP is
//! kept in `[0, max_hp]`. Drawing recycles the discard pile when the deck
//! runs out, and regenerates a fresh deck when both are empty.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use crate::cards::{draw_card, shuffle_deck, Card, Deck};
use crate::effects::{hand_bonus, StatusEffect};
use crate::rules::{calculate_total_with_bonus, Hand};

/// Which side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Ai => f.write_str("AI"),
        }
    }
}

/// How a draw was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refill {
    /// Drawn straight from the deck.
    None,
    /// The discard pile was shuffled back into the deck first.
    Reshuffled,
    /// Deck and discard were both empty; a fresh deck was generated.
    Regenerated,
}

/// One side's fighting state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: i32,
    pub max_hp: i32,
    pub deck: Deck,
    pub discard: Deck,
    pub hand: Hand,
    pub status_effects: Vec<StatusEffect>,
}

impl Combatant {
    /// Full-HP combatant with the given deck and empty hand and discard.
    #[must_use]
    pub fn new(max_hp: i32, deck: Deck) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            deck,
            discard: Deck::new(),
            hand: Hand::new(),
            status_effects: Vec::new(),
        }
    }

    /// Subtract HP, floored at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        before - self.hp
    }

    /// Add HP, capped at `max_hp`. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Hand total including status-effect bonuses.
    ///
    /// Bonuses only apply once the hand has a card.
    #[must_use]
    pub fn total(&self) -> f64 {
        calculate_total_with_bonus(self.hand.cards(), hand_bonus(&self.status_effects))
    }

    /// Cards available to draw before a fresh deck would be needed.
    #[must_use]
    pub fn cards_available(&self) -> usize {
        self.deck.len() + self.discard.len()
    }

    /// Draw the top card, recycling the discard pile or regenerating a deck
    /// with `fresh` when needed.
    pub fn draw(
        &mut self,
        rng: &mut GameRng,
        fresh: impl FnOnce(&mut GameRng) -> Deck,
    ) -> Option<(Card, Refill)> {
        let mut refill = Refill::None;
        if self.deck.is_empty() {
            if self.discard.is_empty() {
                self.deck = fresh(rng);
                refill = Refill::Regenerated;
            } else {
                let pile = std::mem::take(&mut self.discard);
                self.deck = shuffle_deck(&pile, rng);
                refill = Refill::Reshuffled;
            }
        }
        draw_card(&mut self.deck).map(|card| (card, refill))
    }

    /// Move every card in hand to the discard pile.
    pub fn discard_hand(&mut self) {
        for card in self.hand.take_cards() {
            self.discard.push_back(card);
        }
    }

    /// Gather hand and discard back into the deck and shuffle.
    pub fn gather_and_shuffle(&mut self, rng: &mut GameRng) {
        self.discard_hand();
        let mut all = std::mem::take(&mut self.deck);
        all.append(std::mem::take(&mut self.discard));
        self.deck = shuffle_deck(&all, rng);
    }

    /// Expire status effects at the end of a round.
    pub fn tick_status_effects(&mut self) {
        self.status_effects.retain_mut(StatusEffect::tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_cards, Suit};

    fn small_deck(n: usize) -> Deck {
        standard_cards().into_iter().take(n).collect()
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Ai);
        assert_eq!(Side::Ai.opponent(), Side::Player);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = Combatant::new(10, Deck::new());
        assert_eq!(c.take_damage(4), 4);
        assert_eq!(c.take_damage(50), 6);
        assert_eq!(c.hp, 0);
        assert!(c.is_defeated());
    }

    #[test]
    fn test_heal_capped() {
        let mut c = Combatant::new(100, Deck::new());
        c.take_damage(3);
        assert_eq!(c.heal(5), 3);
        assert_eq!(c.hp, 100);
    }

    #[test]
    fn test_draw_recycles_discard() {
        let mut rng = GameRng::new(1);
        let mut c = Combatant::new(100, Deck::new());
        c.discard = small_deck(3);

        let (_, refill) = c.draw(&mut rng, |_| Deck::new()).unwrap();

        assert_eq!(refill, Refill::Reshuffled);
        assert_eq!(c.deck.len(), 2);
        assert!(c.discard.is_empty());
    }

    #[test]
    fn test_draw_regenerates_when_exhausted() {
        let mut rng = GameRng::new(1);
        let mut c = Combatant::new(100, Deck::new());

        let (_, refill) = c.draw(&mut rng, |_| small_deck(5)).unwrap();

        assert_eq!(refill, Refill::Regenerated);
        assert_eq!(c.deck.len(), 4);
    }

    #[test]
    fn test_discard_hand() {
        let mut c = Combatant::new(100, Deck::new());
        c.hand = Hand::from_cards([Card::ace(Suit::Hearts), Card::ace(Suit::Clubs)]);

        c.discard_hand();

        assert!(c.hand.is_empty());
        assert_eq!(c.discard.len(), 2);
    }

    #[test]
    fn test_gather_and_shuffle() {
        let mut rng = GameRng::new(9);
        let mut c = Combatant::new(100, small_deck(10));
        c.discard = small_deck(4);
        c.hand = Hand::from_cards([Card::ace(Suit::Hearts)]);

        c.gather_and_shuffle(&mut rng);

        assert_eq!(c.deck.len(), 15);
        assert!(c.discard.is_empty());
        assert!(c.hand.is_empty());
    }

    #[test]
    fn test_status_bonus_in_total() {
        let mut c = Combatant::new(100, Deck::new());
        c.status_effects.push(StatusEffect::indefinite("dog", 1.0));
        assert_eq!(c.total(), 0.0);

        c.hand = Hand::from_cards([Card::standard(9.0, Suit::Hearts, "9 of hearts")]);
        assert_eq!(c.total(), 10.0);
    }
}
