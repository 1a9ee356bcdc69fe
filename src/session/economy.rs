//! HP, shield, chips and deck edits on a session.
//!
//! Shield and chips belong to the player only. Damage to the player is
//! absorbed by the shield first.

use tracing::debug;

use super::machine::GameSession;
use crate::cards::Card;
use crate::core::{DeckError, Side};

impl GameSession {
    /// Spend chips if the player can afford it.
    pub fn spend_chips(&mut self, amount: u32) -> bool {
        if self.chips < amount {
            return false;
        }
        self.chips -= amount;
        true
    }

    pub fn earn_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Remove up to `amount` chips. Returns the chips actually lost.
    pub fn lose_chips(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.chips);
        self.chips -= lost;
        lost
    }

    /// Heal the player, capped at max HP. Returns HP restored.
    pub fn heal_player(&mut self, amount: i32) -> i32 {
        self.player.heal(amount)
    }

    pub fn gain_shield(&mut self, amount: i32) {
        self.shield += amount.max(0);
    }

    /// Damage the player. The shield absorbs first. Returns HP lost.
    pub fn apply_damage_to_player(&mut self, damage: i32) -> i32 {
        let damage = damage.max(0);
        let absorbed = damage.min(self.shield);
        self.shield -= absorbed;
        let lost = self.player.take_damage(damage - absorbed);
        debug!(damage, absorbed, lost, hp = self.player.hp, "player damaged");
        lost
    }

    /// Damage the AI. Returns HP lost.
    pub fn apply_damage_to_ai(&mut self, damage: i32) -> i32 {
        let lost = self.ai.take_damage(damage);
        debug!(damage, lost, hp = self.ai.hp, "AI damaged");
        lost
    }

    pub fn apply_damage(&mut self, side: Side, damage: i32) -> i32 {
        match side {
            Side::Player => self.apply_damage_to_player(damage),
            Side::Ai => self.apply_damage_to_ai(damage),
        }
    }

    /// Add a card to the bottom of the player's deck.
    pub fn add_card_to_deck(&mut self, card: Card) {
        self.log(format!("{} added to your deck", card.name));
        self.player.deck.push_back(card);
    }

    /// Remove the card at `index` from the player's deck.
    pub fn remove_card_from_deck(&mut self, index: usize) -> Result<Card, DeckError> {
        let len = self.player.deck.len();
        if index >= len {
            return Err(DeckError::IndexOutOfRange { index, len });
        }
        let card = self.player.deck.remove(index);
        self.log(format!("{} removed from your deck", card.name));
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::SessionConfig;
    use crate::session::GameSession;

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default().with_seed(3).without_delays())
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut s = session();
        s.gain_shield(3);

        assert_eq!(s.apply_damage_to_player(5), 2);
        assert_eq!(s.shield(), 0);
        assert_eq!(s.player().hp, 98);
    }

    #[test]
    fn test_shield_larger_than_damage() {
        let mut s = session();
        s.gain_shield(10);

        assert_eq!(s.apply_damage_to_player(4), 0);
        assert_eq!(s.shield(), 6);
        assert_eq!(s.player().hp, 100);
    }

    #[test]
    fn test_spend_chips() {
        let mut s = session();
        assert!(!s.spend_chips(21));
        assert_eq!(s.chips(), 20);
        assert!(s.spend_chips(20));
        assert_eq!(s.chips(), 0);
    }

    #[test]
    fn test_lose_chips_saturates() {
        let mut s = session();
        assert_eq!(s.lose_chips(50), 20);
        assert_eq!(s.chips(), 0);
    }

    #[test]
    fn test_heal_player_capped() {
        let mut s = session();
        s.apply_damage_to_player(3);
        assert_eq!(s.heal_player(5), 3);
        assert_eq!(s.player().hp, 100);
    }

    #[test]
    fn test_deck_edits() {
        let mut s = session();
        let first = s.player_deck()[0].clone();

        let removed = s.remove_card_from_deck(0).unwrap();
        assert_eq!(removed, first);
        assert_eq!(s.player_deck().len(), 51);

        s.add_card_to_deck(removed.clone());
        assert_eq!(s.player_deck().back(), Some(&removed));

        assert!(s.remove_card_from_deck(52).is_err());
    }
}
