//! The round state machine.
//!
//! `GameSession` owns both combatants, the player's economy, the round
//! flags and the scheduler. Player input arrives through [`GameSession::hit`]
//! and [`GameSession::stand`]; everything the AI does runs as a scheduled
//! continuation driven by [`GameSession::advance`] or
//! [`GameSession::run_pending`].
//!
//! ## Phases
//!
//! ```text
//! Idle -> PlayerTurn <-> AiTurn -> Resolution -> (delay) -> Idle -> ...
//! ```
//!
//! Actions outside `PlayerTurn`, or after the player stood, are silently
//! ignored.

use im::Vector;
use tracing::{debug, warn};

use super::resolution::RoundRecord;
use super::scheduler::{Continuation, ScheduledTask, Scheduler};
use super::state::{GameStatus, RoundPhase, RoundState};
use crate::ai::{should_hit, Archetype, DecisionContext};
use crate::cards::{create_standard_deck, shuffle_deck, Card, Deck};
use crate::core::{Combatant, GameRng, Refill, SessionConfig, Side};
use crate::effects::EffectResolver;
use crate::rules::{is_bust, Hand, BLACKJACK};

/// Action log entries kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 200;

/// One game: a run of encounters against AI opponents.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub(crate) config: SessionConfig,
    pub(crate) rng: GameRng,
    pub(crate) player: Combatant,
    pub(crate) ai: Combatant,
    pub(crate) chips: u32,
    pub(crate) shield: i32,
    pub(crate) bonus_damage: i32,
    pub(crate) round: RoundState,
    pub(crate) status: GameStatus,
    /// 1-based.
    pub(crate) encounter: u32,
    /// Bumped by every reset; stale continuations compare against it.
    pub(crate) generation: u64,
    pub(crate) scheduler: Scheduler,
    pub(crate) log: Vector<String>,
    pub(crate) round_result: Option<String>,
    pub(crate) last_round: Option<RoundRecord>,
}

impl GameSession {
    /// Start a game with a fresh standard deck. The first round starts
    /// immediately.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let deck = create_standard_deck(&mut rng);
        Self::with_deck(config, rng, deck)
    }

    fn with_deck(config: SessionConfig, mut rng: GameRng, player_deck: Deck) -> Self {
        let archetype = Archetype::for_encounter(1);
        let ai = Combatant::new(config.ai_hp_for_encounter(1), archetype.build_deck(&mut rng));

        let mut session = Self {
            player: Combatant::new(config.initial_hp, player_deck),
            ai,
            chips: config.initial_chips,
            shield: 0,
            bonus_damage: 0,
            round: RoundState::default(),
            status: GameStatus::InProgress,
            encounter: 1,
            generation: 0,
            scheduler: Scheduler::new(),
            log: Vector::new(),
            round_result: None,
            last_round: None,
            config,
            rng,
        };
        session.log(format!("Encounter 1 begins against a {} opponent", archetype.name()));
        session.reset_round();
        session
    }

    /// Restart from scratch with a new standard deck.
    pub fn reset_game(&mut self) {
        let deck = create_standard_deck(&mut self.rng);
        self.restart_with(deck);
    }

    /// Restart from scratch with a chosen starting deck, shuffled.
    pub fn start_new_game_with_deck(&mut self, deck: Deck) {
        let deck = shuffle_deck(&deck, &mut self.rng);
        self.restart_with(deck);
    }

    fn restart_with(&mut self, deck: Deck) {
        // Carry the clock forward so pending tasks from the old game stay
        // ordered behind new ones; the generation bump makes them stale.
        let rng = self.rng.fork();
        let scheduler = std::mem::take(&mut self.scheduler);
        let generation = self.generation;

        *self = Self::with_deck(self.config.clone(), rng, deck);
        self.scheduler = scheduler;
        self.generation += generation;
        debug!(generation = self.generation, "game reset");
    }

    // === Round lifecycle ===

    /// Begin a round from `Idle`. Does nothing in any other phase or once
    /// the game is over.
    pub fn start_round(&mut self) {
        if self.status.is_over() || self.round.phase != RoundPhase::Idle {
            debug!(phase = ?self.round.phase, status = ?self.status, "start_round ignored");
            return;
        }

        if self.player.cards_available() < 2 {
            warn!(available = self.player.cards_available(), "player deck nearly exhausted at round start");
            if self.player.is_defeated() {
                self.status = GameStatus::Lost;
                self.log("You have been defeated");
                return;
            }
        }

        self.round.round_number += 1;
        self.round.phase = RoundPhase::PlayerTurn;
        self.round_result = None;
        self.log(format!("Round {} begins", self.round.round_number));
        debug!(encounter = self.encounter, round = self.round.round_number, "round started");
    }

    /// Flush both hands, invalidate pending continuations and return to
    /// `Idle`. Starts the next round unless the game is over.
    pub fn reset_round(&mut self) {
        if self.ai.is_defeated() && !self.status.is_over() {
            // Encounter already settled: move on rather than replay it.
            self.start_new_encounter();
            return;
        }
        self.generation += 1;
        self.player.discard_hand();
        self.ai.discard_hand();
        self.round.reset();
        if !self.status.is_over() {
            self.start_round();
        }
    }

    // === Player actions ===

    fn can_act(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.round.phase == RoundPhase::PlayerTurn
            && !self.round.player_stood
    }

    /// Draw a card for the player.
    pub fn hit(&mut self) {
        if !self.can_act() {
            debug!(phase = ?self.round.phase, stood = self.round.player_stood, "hit ignored");
            return;
        }

        self.draw_for(Side::Player);
        if self.check_forced_resolution() {
            return;
        }

        let total = self.player.total();
        if is_bust(total) {
            self.log(format!("You bust with {total}"));
            self.round.player_stood = true;
        }
        self.after_player_action();
    }

    /// End the player's turn.
    pub fn stand(&mut self) {
        if !self.can_act() {
            debug!(phase = ?self.round.phase, stood = self.round.player_stood, "stand ignored");
            return;
        }

        self.round.player_stood = true;
        self.log(format!("You stand on {}", self.player.total()));
        EffectResolver::on_stand(self, Side::Player);
        if self.check_forced_resolution() {
            return;
        }
        self.after_player_action();
    }

    fn after_player_action(&mut self) {
        if self.round.player_stood && self.round.ai_stood {
            self.enter_resolution();
            return;
        }
        if self.round.ai_stood {
            // Nothing left for the AI to do; the player keeps drawing.
            self.round.phase = RoundPhase::PlayerTurn;
            return;
        }

        self.round.phase = RoundPhase::AiTurn;
        let continuation = if self.ai.hand.is_empty() {
            Continuation::AiOpeningDraw
        } else {
            Continuation::AiTakeTurn
        };
        self.schedule(self.config.ai_think_delay_ms, continuation);
    }

    // === AI turn ===

    fn ai_opening_draw(&mut self) {
        self.draw_for(Side::Ai);
        if self.check_forced_resolution() {
            return;
        }
        if self.ai.hand.len() < 2 {
            self.schedule(self.config.ai_draw_delay_ms, Continuation::AiOpeningDraw);
            return;
        }
        self.after_ai_action(true);
    }

    fn ai_take_turn(&mut self) {
        if self.ai.hand.is_empty() {
            self.ai_opening_draw();
            return;
        }

        let ctx = DecisionContext {
            hand_size: self.ai.hand.len(),
            ai_total: self.ai.total(),
            player_total: self.player.total(),
            encounter: self.encounter,
        };
        let hit = should_hit(&ctx, &mut self.rng);
        debug!(?ctx, hit, "AI decision");

        if hit {
            self.draw_for(Side::Ai);
            if self.check_forced_resolution() {
                return;
            }
        } else {
            self.log(format!("AI stands on {}", ctx.ai_total));
            EffectResolver::on_stand(self, Side::Ai);
            if self.check_forced_resolution() {
                return;
            }
        }
        self.after_ai_action(hit);
    }

    fn after_ai_action(&mut self, hit: bool) {
        let total = self.ai.total();
        if !hit || total >= BLACKJACK {
            if is_bust(total) {
                self.log(format!("AI busts with {total}"));
            }
            self.round.ai_stood = true;
            if self.round.player_stood {
                self.enter_resolution();
            } else {
                self.round.phase = RoundPhase::PlayerTurn;
            }
            return;
        }

        // A stood player cannot take the turn back, so the AI plays on.
        if self.round.player_stood || self.rng.gen_bool(self.config.ai_continue_chance) {
            self.schedule(self.config.ai_think_delay_ms, Continuation::AiTakeTurn);
        } else {
            self.round.phase = RoundPhase::PlayerTurn;
        }
    }

    /// Draw one card for `side`, put it in hand and fire its `OnPlay`
    /// effect. Returns the card's hand index.
    fn draw_for(&mut self, side: Side) -> Option<usize> {
        let archetype = self.archetype();
        let fresh = move |rng: &mut GameRng| match side {
            Side::Player => create_standard_deck(rng),
            Side::Ai => archetype.build_deck(rng),
        };
        let combatant = match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        };

        let Some((card, refill)) = combatant.draw(&mut self.rng, fresh) else {
            warn!(%side, "no card available to draw");
            return None;
        };
        combatant.hand.push(card.clone().into());
        let index = combatant.hand.len() - 1;

        match refill {
            Refill::None => {}
            Refill::Reshuffled => self.log(format!("{side} shuffles the discard pile into the deck")),
            Refill::Regenerated => {
                warn!(%side, "deck and discard exhausted, regenerating deck");
                self.log(format!("{side} draws from a fresh deck"));
            }
        }
        match side {
            Side::Player => self.log(format!("You draw {card}")),
            Side::Ai => self.log(format!("AI draws {card}")),
        }
        debug!(%side, card = %card, total = self.combatant(side).total(), "draw");

        EffectResolver::on_play(self, side, index);
        Some(index)
    }

    /// Jump to resolution on an auto-win or when direct damage ended a
    /// fight mid-round.
    fn check_forced_resolution(&mut self) -> bool {
        let forced =
            self.player.hand.has_auto_win() || self.player.is_defeated() || self.ai.is_defeated();
        if forced {
            self.enter_resolution();
        }
        forced
    }

    // === Clock ===

    pub(crate) fn schedule(&mut self, delay_ms: u64, continuation: Continuation) {
        debug!(delay_ms, ?continuation, generation = self.generation, "scheduled");
        self.scheduler.schedule(delay_ms, self.generation, continuation);
    }

    /// Move the clock forward by `ms`, running every continuation that
    /// comes due, in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
    }

    /// Run continuations until none remain. Afterwards the session is
    /// waiting for player input, or the game is over.
    pub fn run_pending(&mut self) {
        while let Some(task) = self.scheduler.pop_next() {
            self.run_task(task);
        }
    }

    /// When the next continuation is due, if any.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    fn run_task(&mut self, task: ScheduledTask) {
        let stale = task.generation != self.generation
            || task.expected_phase != self.round.phase
            || self.status.is_over();
        if stale {
            warn!(
                continuation = ?task.continuation,
                task_generation = task.generation,
                generation = self.generation,
                phase = ?self.round.phase,
                "dropping stale continuation"
            );
            return;
        }

        match task.continuation {
            Continuation::AiOpeningDraw => self.ai_opening_draw(),
            Continuation::AiTakeTurn => self.ai_take_turn(),
            Continuation::NextRound => self.reset_round(),
            Continuation::NextEncounter => self.start_new_encounter(),
        }
    }

    // === Log ===

    /// Append a line to the action log.
    pub(crate) fn log(&mut self, entry: impl Into<String>) {
        self.log.push_back(entry.into());
        while self.log.len() > LOG_CAPACITY {
            self.log.pop_front();
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    #[must_use]
    pub fn ai(&self) -> &Combatant {
        &self.ai
    }

    #[must_use]
    pub fn player_hand(&self) -> &Hand {
        &self.player.hand
    }

    #[must_use]
    pub fn ai_hand(&self) -> &Hand {
        &self.ai.hand
    }

    #[must_use]
    pub fn player_total(&self) -> f64 {
        self.player.total()
    }

    #[must_use]
    pub fn ai_total(&self) -> f64 {
        self.ai.total()
    }

    /// The player's deck in draw order.
    #[must_use]
    pub fn player_deck(&self) -> &Deck {
        &self.player.deck
    }

    #[must_use]
    pub fn chips(&self) -> u32 {
        self.chips
    }

    #[must_use]
    pub fn shield(&self) -> i32 {
        self.shield
    }

    #[must_use]
    pub fn bonus_damage(&self) -> i32 {
        self.bonus_damage
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn encounter(&self) -> u32 {
        self.encounter
    }

    /// Archetype of the current opponent.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        Archetype::for_encounter(self.encounter)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn log_entries(&self) -> &Vector<String> {
        &self.log
    }

    /// Summary of the last resolved round, until the next round starts.
    #[must_use]
    pub fn round_result(&self) -> Option<&str> {
        self.round_result.as_deref()
    }

    /// The most recently resolved round.
    #[must_use]
    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.last_round.as_ref()
    }

    /// Cards still in the player's deck and discard pile.
    #[must_use]
    pub fn player_pile_sizes(&self) -> (usize, usize) {
        (self.player.deck.len(), self.player.discard.len())
    }

    #[must_use]
    pub fn ai_pile_sizes(&self) -> (usize, usize) {
        (self.ai.deck.len(), self.ai.discard.len())
    }

    /// Put a specific card on top of the player's deck.
    pub fn stack_player_deck(&mut self, card: Card) {
        self.player.deck.push_front(card);
    }

    /// Put a specific card on top of the AI's deck.
    pub fn stack_ai_deck(&mut self, card: Card) {
        self.ai.deck.push_front(card);
    }
}
