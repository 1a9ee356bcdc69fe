//! Card effect definitions.
//!
//! Effects are a closed set of kinds, each carrying its own payload, and
//! are dispatched by exhaustive `match`. A card carries at most one effect,
//! paired with the trigger that fires it.

use serde::{Deserialize, Serialize};

/// What an effect does.
///
/// ## Immediate Effects
///
/// - `GainChips` / `LoseChips`: adjust the chip balance
/// - `GainShield`: add to the owner's shield pool
/// - `DamageOpponent`: direct HP damage, independent of the round outcome
/// - `HealPlayer`: heal the owner, capped at max HP
/// - `RemoveOpponentCard`: discard the opponent's most recent card
///
/// ## Hand Effects
///
/// - `ModifyHandTotal`: shifts the hand total while the card is in hand
/// - `RandomValue`: rolls the card's value for this play
/// - `AutoWin`: the hand counts as 21 and the round resolves at once
///
/// ## Persistent Effects
///
/// - `Summon`: creates a status effect that adds to every later hand total
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    ModifyHandTotal { amount: f64 },
    GainChips { amount: u32 },
    LoseChips { amount: u32 },
    AutoWin,
    GainShield { amount: i32 },
    DamageOpponent { amount: i32 },
    HealPlayer { amount: i32 },
    RandomValue { low: i32, high: i32 },
    Summon { summon_type: String, amount: f64 },
    RemoveOpponentCard,
}

/// When an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// When the card enters a hand.
    OnPlay,
    /// When the owner stands.
    OnStand,
    /// At resolution, if the owner won the round.
    OnRoundWin,
    /// At resolution, if the owner lost the round.
    OnRoundLose,
    /// At resolution, on a tie.
    OnTie,
    /// Always on while the card is in hand.
    Persistent,
}

/// How long an effect's consequence lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDuration {
    /// Fires once per play.
    #[default]
    Once,
    /// Outlives the round.
    Persistent,
}

/// An effect attached to a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEffect {
    pub kind: EffectKind,
    pub trigger: EffectTrigger,
    pub duration: EffectDuration,
    pub description: String,
}

impl CardEffect {
    /// Create a once-per-play effect with a generated description.
    #[must_use]
    pub fn new(kind: EffectKind, trigger: EffectTrigger) -> Self {
        let description = kind.describe();
        Self {
            kind,
            trigger,
            duration: EffectDuration::Once,
            description,
        }
    }

    /// Mark the effect persistent.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.duration = EffectDuration::Persistent;
        self
    }

    /// Override the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this effect may fire more than once per play.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration == EffectDuration::Persistent
    }
}

impl EffectKind {
    /// Short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            EffectKind::ModifyHandTotal { amount } => format!("Adds {amount:+} to your hand total"),
            EffectKind::GainChips { amount } => format!("Gain {amount} chips"),
            EffectKind::LoseChips { amount } => format!("Lose {amount} chips"),
            EffectKind::AutoWin => "Instantly wins the round".to_string(),
            EffectKind::GainShield { amount } => format!("Gain a {amount} HP shield"),
            EffectKind::DamageOpponent { amount } => format!("Deal {amount} damage to the opponent"),
            EffectKind::HealPlayer { amount } => format!("Heal {amount} HP"),
            EffectKind::RandomValue { low, high } => format!("Takes a random value between {low}-{high}"),
            EffectKind::Summon { summon_type, amount } => {
                format!("Summons a {summon_type} that adds {amount:+} to every hand")
            }
            EffectKind::RemoveOpponentCard => "Removes one card from the opponent's hand".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_is_once() {
        let effect = CardEffect::new(EffectKind::GainChips { amount: 5 }, EffectTrigger::OnPlay);
        assert!(!effect.is_persistent());
        assert_eq!(effect.description, "Gain 5 chips");
    }

    #[test]
    fn test_persistent() {
        let effect = CardEffect::new(
            EffectKind::Summon { summon_type: "dog".to_string(), amount: 1.0 },
            EffectTrigger::OnPlay,
        )
        .persistent();
        assert!(effect.is_persistent());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = CardEffect::new(EffectKind::RandomValue { low: 1, high: 10 }, EffectTrigger::OnPlay)
            .with_description("Takes a random value");
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: CardEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
