//! Special card catalog, starting-deck presets and shop offer selection.
//!
//! The catalog order is stable: presets refer to cards by position.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardType, CardValue, Suit};
use super::deck::{create_standard_deck, Deck};
use crate::core::GameRng;
use crate::effects::{CardEffect, EffectKind, EffectTrigger};

/// Build the fixed catalog of non-standard cards.
#[must_use]
pub fn create_special_cards() -> Vec<Card> {
    let on_play = |kind| CardEffect::new(kind, EffectTrigger::OnPlay);

    vec![
        Card::new("The Fool", CardValue::Fixed(0.0), Suit::Tarot, CardType::Tarot)
            .with_description("Takes a random value between 1-10")
            .with_effect(on_play(EffectKind::RandomValue { low: 1, high: 10 })),
        Card::new("Gerald from Riviera", CardValue::Fixed(5.0), Suit::Business, CardType::Business)
            .with_description("Removes one card from the AI's hand")
            .with_effect(on_play(EffectKind::RemoveOpponentCard)),
        Card::new("Business Card", CardValue::Fixed(3.0), Suit::Business, CardType::Business)
            .with_description("Networking pays: gain 5 chips when played")
            .with_effect(on_play(EffectKind::GainChips { amount: 5 })),
        Card::new("Infinity Card", CardValue::Fixed(0.0), Suit::Special, CardType::Special)
            .with_description("Instantly wins the round")
            .with_effect(on_play(EffectKind::AutoWin)),
        Card::new("Half Card", CardValue::Fixed(0.5), Suit::Special, CardType::Special)
            .with_description("Worth 0.5 points for precision plays"),
        Card::new("Shield Card", CardValue::Fixed(2.0), Suit::Special, CardType::Special)
            .with_description("Grants a 5 HP shield")
            .with_effect(on_play(EffectKind::GainShield { amount: 5 })),
        Card::new("Blackjack Card", CardValue::Fixed(21.0), Suit::Special, CardType::Special)
            .with_description("Worth exactly 21 points, but high risk"),
        Card::new("The Chariot", CardValue::Fixed(7.0), Suit::Tarot, CardType::Tarot)
            .with_description("Charges the opponent for 5 damage")
            .with_effect(on_play(EffectKind::DamageOpponent { amount: 5 })),
        Card::new("Golden Vault Bank Card", CardValue::Fixed(4.0), Suit::Business, CardType::Business)
            .with_description("Gain 15 chips if you win the round")
            .with_effect(CardEffect::new(EffectKind::GainChips { amount: 15 }, EffectTrigger::OnRoundWin)),
        Card::new("Dog Card", CardValue::Fixed(1.0), Suit::Special, CardType::Special)
            .with_description("Summons a loyal dog that adds +1 to every hand this encounter")
            .with_effect(
                on_play(EffectKind::Summon { summon_type: "dog".to_string(), amount: 1.0 }).persistent(),
            ),
        Card::new("Debt", CardValue::Fixed(-3.0), Suit::Business, CardType::Business)
            .with_description("Lowers your total by 3, but costs 5 chips if you lose")
            .with_effect(CardEffect::new(EffectKind::LoseChips { amount: 5 }, EffectTrigger::OnRoundLose)),
        Card::new("The Star", CardValue::Fixed(3.0), Suit::Tarot, CardType::Tarot)
            .with_description("Heal 8 HP when you stand")
            .with_effect(CardEffect::new(EffectKind::HealPlayer { amount: 8 }, EffectTrigger::OnStand)),
        Card::new("The Hanged Man", CardValue::Fixed(4.0), Suit::Tarot, CardType::Tarot)
            .with_description("Gain a 3 HP shield on a tie")
            .with_effect(CardEffect::new(EffectKind::GainShield { amount: 3 }, EffectTrigger::OnTie)),
        Card::new("The Magician", CardValue::Fixed(2.0), Suit::Tarot, CardType::Tarot)
            .with_description("Adds +1 to your hand total")
            .with_effect(on_play(EffectKind::ModifyHandTotal { amount: 1.0 })),
    ]
}

/// Name-indexed view over the special catalog.
#[derive(Clone, Debug)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, usize>,
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        let cards = create_special_cards();
        let by_name = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self { cards, by_name }
    }

    /// Look a card up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.by_name.get(name).and_then(|&i| self.cards.get(i))
    }

    /// Card at a catalog position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards of one family.
    pub fn by_type(&self, card_type: CardType) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }
}

/// Shop families guaranteed a slot when available.
const SHOP_FAMILIES: [CardType; 3] = [CardType::Tarot, CardType::Business, CardType::Special];

/// Pick `count` distinct catalog cards for the shop.
///
/// One card per family is picked first (when that family has any cards),
/// then the remaining slots are filled at random without duplicates.
#[must_use]
pub fn generate_shop_options(catalog: &CardCatalog, count: usize, rng: &mut GameRng) -> Vec<Card> {
    let mut remaining: Vec<usize> = (0..catalog.len()).collect();
    let mut picked: Vec<usize> = Vec::with_capacity(count);

    for family in SHOP_FAMILIES {
        if picked.len() >= count {
            break;
        }
        let candidates: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| catalog.at(i).is_some_and(|c| c.card_type == family))
            .collect();
        if let Some(&choice) = rng.choose(&candidates) {
            picked.push(choice);
            remaining.retain(|&i| i != choice);
        }
    }

    let fill = count.saturating_sub(picked.len());
    picked.extend(rng.choose_multiple(&remaining, fill).into_iter().copied());

    picked.into_iter().filter_map(|i| catalog.at(i).cloned()).collect()
}

/// Starting-deck presets offered before a new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckPreset {
    /// Standard deck only.
    Basic,
    /// Standard deck plus Business Card, Shield Card and Dog Card.
    Balanced,
    /// Standard deck plus Infinity Card, The Chariot and Golden Vault Bank Card.
    Aggressive,
    /// Standard deck plus 3-5 random distinct catalog cards.
    Random,
}

impl DeckPreset {
    /// Build a starting deck for this preset. Special cards go on the bottom;
    /// the session shuffles on game start.
    #[must_use]
    pub fn build(self, catalog: &CardCatalog, rng: &mut GameRng) -> Deck {
        let mut deck = create_standard_deck(rng);
        let extras: Vec<Card> = match self {
            DeckPreset::Basic => Vec::new(),
            DeckPreset::Balanced => [2, 5, 9].iter().filter_map(|&i| catalog.at(i).cloned()).collect(),
            DeckPreset::Aggressive => [3, 7, 8].iter().filter_map(|&i| catalog.at(i).cloned()).collect(),
            DeckPreset::Random => {
                let count = rng.gen_range_inclusive(3, 5) as usize;
                let pool: Vec<&Card> = catalog.iter().collect();
                rng.choose_multiple(&pool, count).into_iter().map(|&c| c.clone()).collect()
            }
        };
        deck.extend(extras);
        deck
    }
}
