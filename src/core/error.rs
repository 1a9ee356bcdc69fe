//! Error types for caller-visible failures.
//!
//! Round actions (`hit`, `stand`) never fail: out-of-phase calls are
//! silently ignored. The errors here cover deck editing, the shop,
//! snapshot encoding and config loading.

use thiserror::Error;

/// Failure editing the player's deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck index {index} out of range (deck size {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure completing a shop transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("not enough chips (needed {needed}, have {available})")]
    NotEnoughChips { needed: u32, available: u32 },
    #[error("no shop offer at index {0}")]
    OfferNotFound(usize),
    #[error("deck too small to remove a card (size {size}, minimum {min})")]
    DeckTooSmall { size: usize, min: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Failure encoding or decoding a session snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Failure loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
