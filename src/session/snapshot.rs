//! Read-only view of a session for hosts.
//!
//! A snapshot carries everything a renderer needs and nothing it could
//! mutate. `encode`/`decode` use bincode for hosts running the engine in
//! another process.

use serde::{Deserialize, Serialize};

use super::machine::GameSession;
use super::resolution::RoundRecord;
use super::state::{GameStatus, RoundPhase};
use crate::ai::Archetype;
use crate::core::{Combatant, SnapshotError};
use crate::effects::StatusEffect;
use crate::rules::PlayedCard;

/// One side's visible state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub hp: i32,
    pub max_hp: i32,
    pub hand: Vec<PlayedCard>,
    pub total: f64,
    pub deck_size: usize,
    pub discard_size: usize,
    pub status_effects: Vec<StatusEffect>,
}

/// Every observable field of a session at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player: CombatantView,
    pub ai: CombatantView,
    pub shield: i32,
    pub bonus_damage: i32,
    pub chips: u32,
    pub phase: RoundPhase,
    pub player_stood: bool,
    pub ai_stood: bool,
    pub round_number: u32,
    pub encounter: u32,
    pub max_encounters: u32,
    pub archetype: Archetype,
    pub status: GameStatus,
    pub log: Vec<String>,
    pub round_result: Option<String>,
    pub last_round: Option<RoundRecord>,
    pub generation: u64,
    pub now_ms: u64,
}

impl SessionSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl GameSession {
    /// Capture the observable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let view = |c: &Combatant| CombatantView {
            hp: c.hp,
            max_hp: c.max_hp,
            hand: c.hand.cards().to_vec(),
            total: c.total(),
            deck_size: c.deck.len(),
            discard_size: c.discard.len(),
            status_effects: c.status_effects.clone(),
        };

        SessionSnapshot {
            player: view(&self.player),
            ai: view(&self.ai),
            shield: self.shield,
            bonus_damage: self.bonus_damage,
            chips: self.chips,
            phase: self.round.phase,
            player_stood: self.round.player_stood,
            ai_stood: self.round.ai_stood,
            round_number: self.round.round_number,
            encounter: self.encounter,
            max_encounters: self.config.max_encounters,
            archetype: self.archetype(),
            status: self.status,
            log: self.log.iter().cloned().collect(),
            round_result: self.round_result.clone(),
            last_round: self.last_round.clone(),
            generation: self.generation,
            now_ms: self.scheduler.now_ms(),
        }
    }
}
