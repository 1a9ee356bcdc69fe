//! Encounter progression.

use tracing::{debug, info};

use super::machine::GameSession;
use crate::core::Combatant;

impl GameSession {
    /// Move on to the next opponent.
    ///
    /// The AI is rebuilt with scaled HP and its archetype's deck. The player
    /// keeps HP, chips and deck but gathers every card back and shuffles;
    /// summons expire.
    pub fn start_new_encounter(&mut self) {
        if self.status.is_over() {
            debug!(status = ?self.status, "start_new_encounter ignored");
            return;
        }

        self.encounter += 1;
        let archetype = self.archetype();
        let max_hp = self.config.ai_hp_for_encounter(self.encounter);
        self.ai = Combatant::new(max_hp, archetype.build_deck(&mut self.rng));

        self.player.status_effects.clear();
        self.player.gather_and_shuffle(&mut self.rng);
        self.round.round_number = 0;

        self.log(format!(
            "Encounter {} begins against a {} opponent ({max_hp} HP)",
            self.encounter,
            archetype.name()
        ));
        info!(encounter = self.encounter, archetype = archetype.name(), max_hp, "encounter started");

        self.reset_round();
    }
}

#[cfg(test)]
mod tests {
    use crate::ai::Archetype;
    use crate::core::SessionConfig;
    use crate::effects::StatusEffect;
    use crate::session::{GameSession, RoundPhase};

    #[test]
    fn test_encounter_scaling() {
        let mut s = GameSession::new(SessionConfig::default().with_seed(12).without_delays());

        for n in 1..=6 {
            s.start_new_encounter();
            assert_eq!(s.encounter(), n + 1);
            assert_eq!(s.ai().max_hp, 100 + 10 * n as i32);
            assert_eq!(s.ai().hp, s.ai().max_hp);
            assert_eq!(s.ai_pile_sizes(), (52, 0));
            assert_eq!(s.archetype(), Archetype::for_encounter(n + 1));
        }
    }

    #[test]
    fn test_player_state_carries_over() {
        let mut s = GameSession::new(SessionConfig::default().with_seed(13).without_delays());
        s.apply_damage_to_player(30);
        s.earn_chips(7);
        s.player.status_effects.push(StatusEffect::indefinite("dog", 1.0));
        s.hit();
        let generation = s.generation();

        s.start_new_encounter();

        assert_eq!(s.player().hp, 70);
        assert_eq!(s.chips(), 27);
        assert!(s.player().status_effects.is_empty());
        assert_eq!(s.player_pile_sizes(), (52, 0));
        assert!(s.generation() > generation);
        assert_eq!(s.phase(), RoundPhase::PlayerTurn);
        assert_eq!(s.round().round_number, 1);
    }
}
