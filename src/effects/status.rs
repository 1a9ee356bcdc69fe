//! Status effects that outlive a single round.

use serde::{Deserialize, Serialize};

/// Duration value meaning "until explicitly removed".
pub const INDEFINITE: i32 = -1;

/// A persistent modifier on a combatant, e.g. a summoned dog adding +1 to
/// every hand total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Kind tag, e.g. `"dog"`.
    pub name: String,
    /// Amount added to the owner's hand total.
    pub amount: f64,
    /// Remaining rounds, or `INDEFINITE`.
    pub duration: i32,
}

impl StatusEffect {
    /// A status effect that lasts until removed.
    #[must_use]
    pub fn indefinite(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            duration: INDEFINITE,
        }
    }

    #[must_use]
    pub fn is_indefinite(&self) -> bool {
        self.duration == INDEFINITE
    }

    /// Count down one round. Returns `false` once the effect has expired.
    pub fn tick(&mut self) -> bool {
        if self.is_indefinite() {
            return true;
        }
        self.duration = (self.duration - 1).max(0);
        self.duration > 0
    }
}

/// Sum of hand-total bonuses from a set of status effects.
#[must_use]
pub fn hand_bonus(effects: &[StatusEffect]) -> f64 {
    effects.iter().map(|e| e.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indefinite_never_expires() {
        let mut dog = StatusEffect::indefinite("dog", 1.0);
        for _ in 0..100 {
            assert!(dog.tick());
        }
        assert!(dog.is_indefinite());
    }

    #[test]
    fn test_timed_expiry() {
        let mut buff = StatusEffect { name: "luck".to_string(), amount: 2.0, duration: 2 };
        assert!(buff.tick());
        assert!(!buff.tick());
        assert_eq!(buff.duration, 0);
    }

    #[test]
    fn test_hand_bonus() {
        let effects = vec![StatusEffect::indefinite("dog", 1.0), StatusEffect::indefinite("dog", 1.0)];
        assert_eq!(hand_bonus(&effects), 2.0);
        assert_eq!(hand_bonus(&[]), 0.0);
    }
}
