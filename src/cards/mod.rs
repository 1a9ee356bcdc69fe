//! Card model: cards, decks, the special catalog and presets.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card record (value, suit, family, optional effect)
//! - `CardValue`: Fixed value or a flexible pair such as the Ace
//! - `Deck`: Ordered pile, index 0 is the top
//! - `CardCatalog`: Name lookup over the non-standard cards
//! - `DeckPreset`: Starting decks offered before a new game

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::{Card, CardType, CardValue, Suit};
pub use catalog::{create_special_cards, generate_shop_options, CardCatalog, DeckPreset};
pub use deck::{
    create_standard_deck, draw_card, rank_name, shuffle_deck, standard_card, standard_cards, Deck,
    STANDARD_DECK_SIZE,
};
