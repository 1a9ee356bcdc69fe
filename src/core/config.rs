//! Session configuration.
//!
//! `SessionConfig` holds every tunable of the round engine: starting
//! resources, encounter scaling, reward sizes, pacing delays and the RNG
//! seed. Hosts can build it in code with the `with_*` methods or load it
//! from JSON.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Player starting and maximum HP.
    pub initial_hp: i32,

    /// Chips the player starts a new game with.
    pub initial_chips: u32,

    /// AI max HP at encounter 1.
    pub ai_base_hp: i32,

    /// Extra AI max HP per cleared encounter.
    pub ai_hp_per_encounter: i32,

    /// Number of encounters in a full game. Clearing the last one wins.
    pub max_encounters: u32,

    /// Chips awarded for winning a round.
    pub win_chips: u32,

    /// Chips awarded for defeating an AI.
    pub encounter_bonus_chips: u32,

    /// Size of each exact-21 suit bonus (heal, chips, damage, shield).
    pub suit_bonus: i32,

    /// Chance the AI keeps the turn after a non-final hit.
    pub ai_continue_chance: f64,

    /// Delay before each AI decision.
    pub ai_think_delay_ms: u64,

    /// Delay between the two cards of the AI's opening deal.
    pub ai_draw_delay_ms: u64,

    /// How long a round result is shown before the next round starts.
    pub result_delay_ms: u64,

    /// Delay between defeating an AI and the next encounter.
    pub encounter_delay_ms: u64,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_hp: 100,
            initial_chips: 20,
            ai_base_hp: 100,
            ai_hp_per_encounter: 10,
            max_encounters: 8,
            win_chips: 10,
            encounter_bonus_chips: 20,
            suit_bonus: 5,
            ai_continue_chance: 0.5,
            ai_think_delay_ms: 800,
            ai_draw_delay_ms: 500,
            result_delay_ms: 2000,
            encounter_delay_ms: 2500,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of encounters in a game.
    pub fn with_max_encounters(mut self, max: u32) -> Self {
        self.max_encounters = max.max(1);
        self
    }

    /// Set the player's starting HP.
    pub fn with_initial_hp(mut self, hp: i32) -> Self {
        self.initial_hp = hp;
        self
    }

    /// Set the AI's continue-turn chance.
    pub fn with_ai_continue_chance(mut self, chance: f64) -> Self {
        self.ai_continue_chance = chance;
        self
    }

    /// Set all pacing delays to zero (useful for tests and headless hosts).
    pub fn without_delays(mut self) -> Self {
        self.ai_think_delay_ms = 0;
        self.ai_draw_delay_ms = 0;
        self.result_delay_ms = 0;
        self.encounter_delay_ms = 0;
        self
    }

    /// AI max HP for a 1-based encounter index.
    #[must_use]
    pub fn ai_hp_for_encounter(&self, encounter: u32) -> i32 {
        let cleared = encounter.saturating_sub(1) as i32;
        self.ai_base_hp + self.ai_hp_per_encounter * cleared
    }
}
