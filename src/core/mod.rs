//! Core engine types: RNG, configuration, errors and combatants.

pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;

pub use combatant::{Combatant, Refill, Side};
pub use config::SessionConfig;
pub use error::{ConfigError, DeckError, ShopError, SnapshotError};
pub use rng::{GameRng, GameRngState};
