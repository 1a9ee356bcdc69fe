//! Round resolution and the game-over check.
//!
//! ## Order of operations
//!
//! 1. Final totals and the outcome table
//! 2. Damage (shield first for the player) and win chips
//! 3. Round-outcome card effects for both sides
//! 4. Suit bonus when the player finished on exactly 21
//! 5. Hands flushed, status effects ticked
//! 6. Game over, next encounter, or next round

use serde::{Deserialize, Serialize};
use tracing::info;

use super::machine::GameSession;
use super::scheduler::Continuation;
use super::state::{GameStatus, RoundPhase};
use crate::core::Side;
use crate::effects::EffectResolver;
use crate::rules::{resolve_outcome, suit_bonus, RoundOutcome, SuitBonus, BLACKJACK};

/// What happened in a resolved round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub outcome: RoundOutcome,
    pub player_total: f64,
    pub ai_total: f64,
    /// Bonus granted for an exact 21, if any.
    pub suit_bonus: Option<SuitBonus>,
}

impl GameSession {
    /// Settle the round. Runs once per round, synchronously.
    pub(crate) fn enter_resolution(&mut self) {
        self.round.phase = RoundPhase::Resolution;

        let player_total = self.player.total();
        let ai_total = self.ai.total();
        let auto_win = self.player.hand.has_auto_win();
        let outcome = resolve_outcome(
            player_total,
            ai_total,
            self.bonus_damage,
            auto_win,
            self.config.win_chips,
        );

        self.apply_damage_to_player(outcome.damage_to_player);
        self.apply_damage_to_ai(outcome.damage_to_ai);
        self.earn_chips(outcome.chips_earned);
        if outcome.bonus_spent {
            self.bonus_damage = 0;
        }

        EffectResolver::on_round_end(self, Side::Player, outcome.winner);
        EffectResolver::on_round_end(self, Side::Ai, outcome.winner);

        let bonus = if player_total == BLACKJACK {
            self.apply_suit_bonus()
        } else {
            None
        };

        let summary = outcome.summary(player_total, ai_total);
        info!(
            encounter = self.encounter,
            round = self.round.round_number,
            player_total,
            ai_total,
            winner = ?outcome.winner,
            damage_to_player = outcome.damage_to_player,
            damage_to_ai = outcome.damage_to_ai,
            "round resolved"
        );
        self.log(summary.clone());
        self.round_result = Some(summary);
        self.last_round = Some(RoundRecord {
            outcome,
            player_total,
            ai_total,
            suit_bonus: bonus,
        });

        self.player.discard_hand();
        self.ai.discard_hand();
        self.player.tick_status_effects();
        self.ai.tick_status_effects();

        self.check_game_over();
    }

    /// Perk for the suit of the player's last card.
    fn apply_suit_bonus(&mut self) -> Option<SuitBonus> {
        let suit = self.player.hand.last()?.card.suit;
        let bonus = suit_bonus(suit)?;
        let amount = self.config.suit_bonus;

        match bonus {
            SuitBonus::Heal => {
                let healed = self.heal_player(amount);
                self.log(format!("Hearts bonus: healed {healed} HP"));
            }
            SuitBonus::Chips => {
                let chips = u32::try_from(amount).unwrap_or(0);
                self.earn_chips(chips);
                self.log(format!("Diamonds bonus: +{chips} chips"));
            }
            SuitBonus::BonusDamage => {
                // Does not stack with a bonus that is still unspent
                self.bonus_damage = self.bonus_damage.max(amount);
                self.log(format!("Clubs bonus: +{amount} damage next round"));
            }
            SuitBonus::Shield => {
                self.gain_shield(amount);
                self.log(format!("Spades bonus: {amount} HP shield"));
            }
        }
        Some(bonus)
    }

    /// End the game, advance to the next encounter, or queue the next
    /// round.
    pub(crate) fn check_game_over(&mut self) {
        if self.player.is_defeated() {
            self.status = GameStatus::Lost;
            self.log("You have been defeated. Game over");
            info!(encounter = self.encounter, "game lost");
            return;
        }

        if self.ai.is_defeated() {
            self.earn_chips(self.config.encounter_bonus_chips);
            self.log(format!(
                "Opponent defeated! +{} chips",
                self.config.encounter_bonus_chips
            ));

            if self.encounter >= self.config.max_encounters {
                self.status = GameStatus::Won;
                self.log("Every opponent defeated. You win");
                info!(encounter = self.encounter, "game won");
                return;
            }
            self.schedule(self.config.encounter_delay_ms, Continuation::NextEncounter);
            return;
        }

        self.schedule(self.config.result_delay_ms, Continuation::NextRound);
    }
}

#[cfg(test)]
mod tests {
    use crate::cards::{Card, Suit};
    use crate::core::SessionConfig;
    use crate::rules::{OutcomeReason, PlayedCard, RoundWinner, SuitBonus};
    use crate::session::{GameSession, GameStatus, RoundPhase};

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default().with_seed(21).without_delays())
    }

    fn card(value: f64, suit: Suit) -> Card {
        Card::standard(value, suit, format!("{value} of {suit}"))
    }

    fn deal(s: &mut GameSession, player: &[Card], ai: &[Card]) {
        for c in player {
            s.player.hand.push(PlayedCard::new(c.clone()));
        }
        for c in ai {
            s.ai.hand.push(PlayedCard::new(c.clone()));
        }
    }

    #[test]
    fn test_player_higher() {
        let mut s = session();
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), card(10.0, Suit::Hearts)],
            &[card(10.0, Suit::Clubs), card(8.0, Suit::Clubs)],
        );

        s.enter_resolution();

        assert_eq!(s.ai().hp, 98);
        assert_eq!(s.chips(), 30);
        assert_eq!(s.phase(), RoundPhase::Resolution);
        let record = s.last_round().unwrap();
        assert_eq!(record.outcome.reason, OutcomeReason::PlayerHigher);
        assert_eq!(record.player_total, 20.0);
    }

    #[test]
    fn test_player_bust() {
        let mut s = session();
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), card(10.0, Suit::Hearts), card(2.0, Suit::Hearts)],
            &[card(10.0, Suit::Clubs), card(9.0, Suit::Clubs)],
        );

        s.enter_resolution();

        assert_eq!(s.player().hp, 81);
        assert_eq!(s.chips(), 20);
    }

    #[test]
    fn test_hands_flushed_and_next_round_queued() {
        let mut s = session();
        deal(&mut s, &[card(5.0, Suit::Spades)], &[card(6.0, Suit::Clubs)]);

        s.enter_resolution();

        assert!(s.player_hand().is_empty());
        assert!(s.ai_hand().is_empty());
        assert_eq!(s.player_pile_sizes().1, 1);
        assert!(s.round_result().is_some());

        s.run_pending();
        assert_eq!(s.phase(), RoundPhase::PlayerTurn);
        assert_eq!(s.round().round_number, 2);
        assert!(s.round_result().is_none());
    }

    #[test]
    fn test_hearts_bonus_heals() {
        let mut s = session();
        s.apply_damage_to_player(10);
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), Card::ace(Suit::Hearts)],
            &[card(10.0, Suit::Clubs), card(9.0, Suit::Clubs)],
        );

        s.enter_resolution();

        assert_eq!(s.player().hp, 95);
        assert_eq!(s.last_round().unwrap().suit_bonus, Some(SuitBonus::Heal));
    }

    #[test]
    fn test_clubs_bonus_spent_next_win() {
        let mut s = session();
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), Card::ace(Suit::Clubs)],
            &[card(10.0, Suit::Clubs), card(9.0, Suit::Clubs)],
        );
        s.enter_resolution();
        assert_eq!(s.bonus_damage(), 5);
        assert_eq!(s.ai().hp, 98);

        s.run_pending();
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), card(9.0, Suit::Hearts)],
            &[card(10.0, Suit::Clubs), card(8.0, Suit::Clubs)],
        );
        s.enter_resolution();

        // 19 - 18 + 5
        assert_eq!(s.ai().hp, 92);
        assert_eq!(s.bonus_damage(), 0);
    }

    #[test]
    fn test_spades_and_diamonds_bonus() {
        let mut s = session();
        deal(&mut s, &[card(10.0, Suit::Hearts), Card::ace(Suit::Spades)], &[card(10.0, Suit::Clubs)]);
        s.enter_resolution();
        assert_eq!(s.shield(), 5);

        s.run_pending();
        deal(&mut s, &[card(10.0, Suit::Hearts), Card::ace(Suit::Diamonds)], &[card(10.0, Suit::Clubs)]);
        s.enter_resolution();
        // Win chips plus the diamonds bonus, on top of the first win
        assert_eq!(s.chips(), 20 + 10 + 10 + 5);
    }

    #[test]
    fn test_tie_at_21_still_grants_bonus() {
        let mut s = session();
        deal(
            &mut s,
            &[card(10.0, Suit::Hearts), Card::ace(Suit::Spades)],
            &[card(10.0, Suit::Clubs), Card::ace(Suit::Clubs)],
        );
        s.enter_resolution();

        let record = s.last_round().unwrap();
        assert_eq!(record.outcome.winner, RoundWinner::Tie);
        assert_eq!(s.shield(), 5);
    }

    #[test]
    fn test_clubs_bonus_does_not_stack_on_tie() {
        let mut s = session();
        s.bonus_damage = 5;
        deal(
            &mut s,
            &[card(10.0, Suit::Spades), Card::ace(Suit::Clubs)],
            &[card(10.0, Suit::Hearts), Card::ace(Suit::Hearts)],
        );
        s.enter_resolution();

        assert_eq!(s.last_round().unwrap().outcome.winner, RoundWinner::Tie);
        assert_eq!(s.last_round().unwrap().suit_bonus, Some(SuitBonus::BonusDamage));
        assert_eq!(s.bonus_damage(), 5);
    }

    #[test]
    fn test_player_defeat_ends_game() {
        let mut s = GameSession::new(SessionConfig::default().with_seed(1).with_initial_hp(5).without_delays());
        deal(&mut s, &[card(2.0, Suit::Hearts)], &[card(10.0, Suit::Clubs), card(10.0, Suit::Spades)]);

        s.enter_resolution();
        s.run_pending();

        assert_eq!(s.status(), GameStatus::Lost);
        assert_eq!(s.player().hp, 0);
        assert_eq!(s.phase(), RoundPhase::Resolution);

        // Terminal until reset
        s.hit();
        assert!(s.player_hand().is_empty());
    }

    #[test]
    fn test_ai_defeat_advances_encounter() {
        let mut s = session();
        s.ai.hp = 1;
        deal(&mut s, &[card(10.0, Suit::Hearts)], &[card(5.0, Suit::Clubs)]);

        s.enter_resolution();
        assert_eq!(s.chips(), 20 + 10 + 20);

        s.run_pending();
        assert_eq!(s.encounter(), 2);
        assert_eq!(s.ai().max_hp, 110);
        assert_eq!(s.phase(), RoundPhase::PlayerTurn);
    }

    #[test]
    fn test_final_encounter_wins_game() {
        let mut s = GameSession::new(SessionConfig::default().with_seed(4).with_max_encounters(1).without_delays());
        s.ai.hp = 1;
        deal(&mut s, &[card(10.0, Suit::Hearts)], &[card(5.0, Suit::Clubs)]);

        s.enter_resolution();
        s.run_pending();

        assert_eq!(s.status(), GameStatus::Won);
        assert_eq!(s.encounter(), 1);
    }
}
