//! # blackjack-battler
//!
//! Round engine for a single-player card battler. The player and an AI
//! opponent play blackjack-style rounds; outcomes become HP damage, chips
//! and deck upgrades, over a run of increasingly tough encounters.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every random decision draws from one seedable
//!    `GameRng`, so a seed replays a whole game.
//!
//! 2. **No real time**: AI pacing and result pauses are continuations on a
//!    virtual clock. Hosts drive it with `advance` or `run_pending`.
//!
//! 3. **Silent rejection**: player actions out of phase are no-ops, never
//!    errors.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors, combatants
//! - `cards`: Card model, decks, special catalog, presets
//! - `effects`: Card effects, status effects, the effect resolver
//! - `rules`: Hand evaluation and the outcome table
//! - `ai`: Archetypes and the hit-or-stand policy
//! - `session`: Round state machine, scheduler, resolution, encounters
//! - `shop`: Between-encounter card shop

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod session;
pub mod shop;

// Re-export commonly used types
pub use crate::core::{
    Combatant, ConfigError, DeckError, GameRng, GameRngState, SessionConfig, ShopError, Side,
    SnapshotError,
};

pub use crate::cards::{Card, CardCatalog, CardType, CardValue, Deck, DeckPreset, Suit};

pub use crate::effects::{CardEffect, EffectKind, EffectResolver, EffectTrigger, StatusEffect};

pub use crate::rules::{calculate_total, Hand, PlayedCard, RoundOutcome, RoundWinner};

pub use crate::ai::{should_hit, Archetype, DecisionContext};

pub use crate::session::{GameSession, GameStatus, RoundPhase, SessionSnapshot};

pub use crate::shop::{Shop, ShopConfig, ShopOffer};
