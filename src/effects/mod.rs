//! Card effects and persistent status effects.
//!
//! - `CardEffect`: What a special card does and when it fires
//! - `StatusEffect`: Modifier that outlives a round (summons)
//! - `EffectResolver`: Applies effects to a running session
//!
//! Effects reach session state only through the resolver, so the
//! once-per-play rule lives in one place.

mod effect;
mod resolver;
mod status;

pub use effect::{CardEffect, EffectDuration, EffectKind, EffectTrigger};
pub use resolver::{EffectResolver, ResolveResult};
pub use status::{hand_bonus, StatusEffect, INDEFINITE};
