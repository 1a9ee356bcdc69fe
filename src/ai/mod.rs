//! AI opponent: archetypes and the hit-or-stand policy.
//!
//! - `Archetype`: Behavioral profile chosen by encounter index, also
//!   selects the AI deck composition
//! - `should_hit`: Threshold policy with a chase adjustment

pub mod archetype;
pub mod policy;

pub use archetype::{Archetype, RiskTolerance, StandThreshold};
pub use policy::{should_hit, DecisionContext, MIN_STAND_THRESHOLD};
