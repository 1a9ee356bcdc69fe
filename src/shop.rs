//! Between-encounter shop: buy special cards, pay to thin the deck.
//!
//! ## Offers
//!
//! A shop shows 3-5 distinct catalog cards, at least one per family when
//! the count allows, each priced from a fixed price list. Bought offers
//! leave the shop.
//!
//! ## Removal
//!
//! Removing a card costs a flat fee and is refused once the deck is down to
//! the minimum size.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{generate_shop_options, Card, CardCatalog};
use crate::core::{DeckError, GameRng, ShopError};
use crate::session::GameSession;

/// Shop pricing and sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Each offer's price is drawn uniformly from this list.
    pub prices: Vec<u32>,
    pub removal_cost: u32,
    /// Removal is refused when the deck holds this many cards or fewer.
    pub min_deck_size: usize,
    pub min_offers: usize,
    pub max_offers: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            prices: vec![15, 20, 25, 30],
            removal_cost: 10,
            min_deck_size: 10,
            min_offers: 3,
            max_offers: 5,
        }
    }
}

/// A card for sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopOffer {
    pub card: Card,
    pub price: u32,
}

/// One visit to the shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    offers: Vec<ShopOffer>,
    removal_cost: u32,
    min_deck_size: usize,
}

impl Shop {
    /// Stock a shop from the catalog.
    #[must_use]
    pub fn generate(catalog: &CardCatalog, config: &ShopConfig, rng: &mut GameRng) -> Self {
        let (low, high) = (config.min_offers.min(config.max_offers), config.max_offers);
        let count = low + rng.index_below(high - low + 1);

        let offers = generate_shop_options(catalog, count, rng)
            .into_iter()
            .map(|card| {
                let price = rng.choose(&config.prices).copied().unwrap_or(0);
                ShopOffer { card, price }
            })
            .collect();

        Self {
            offers,
            removal_cost: config.removal_cost,
            min_deck_size: config.min_deck_size,
        }
    }

    /// Stock a shop using the session's RNG.
    #[must_use]
    pub fn for_session(session: &mut GameSession, catalog: &CardCatalog, config: &ShopConfig) -> Self {
        Self::generate(catalog, config, &mut session.rng)
    }

    #[must_use]
    pub fn offers(&self) -> &[ShopOffer] {
        &self.offers
    }

    #[must_use]
    pub fn removal_cost(&self) -> u32 {
        self.removal_cost
    }

    /// Buy the offer at `index` into the player's deck.
    pub fn purchase(&mut self, session: &mut GameSession, index: usize) -> Result<Card, ShopError> {
        let price = self.offers.get(index).ok_or(ShopError::OfferNotFound(index))?.price;
        if !session.spend_chips(price) {
            return Err(ShopError::NotEnoughChips {
                needed: price,
                available: session.chips(),
            });
        }

        let offer = self.offers.remove(index);
        debug!(card = %offer.card.name, price, "card purchased");
        session.add_card_to_deck(offer.card.clone());
        Ok(offer.card)
    }

    /// Pay to remove the card at `deck_index` from the player's deck.
    pub fn remove_card(&self, session: &mut GameSession, deck_index: usize) -> Result<Card, ShopError> {
        let size = session.player_deck().len();
        if size <= self.min_deck_size {
            return Err(ShopError::DeckTooSmall {
                size,
                min: self.min_deck_size,
            });
        }
        if deck_index >= size {
            return Err(DeckError::IndexOutOfRange { index: deck_index, len: size }.into());
        }
        if !session.spend_chips(self.removal_cost) {
            return Err(ShopError::NotEnoughChips {
                needed: self.removal_cost,
                available: session.chips(),
            });
        }

        let card = session.remove_card_from_deck(deck_index)?;
        debug!(card = %card.name, "card removed");
        Ok(card)
    }
}
