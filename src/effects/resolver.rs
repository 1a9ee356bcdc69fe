//! Effect resolution - executing card effects on a game session.
//!
//! The resolver fires a hand card's effect when its trigger matches:
//! `OnPlay` when the card is drawn, `OnStand` when its owner stands, and the
//! round-outcome triggers during resolution. A non-persistent effect fires
//! at most once per play.

use tracing::debug;

use super::effect::{EffectKind, EffectTrigger};
use super::status::StatusEffect;
use crate::core::Side;
use crate::rules::RoundWinner;
use crate::session::GameSession;

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect could not apply (e.g. a player-only resource on the AI).
    Failed(String),
    /// Trigger did not match, the card has no effect, or it already fired.
    Skipped,
}

/// Resolves card effects on a session.
pub struct EffectResolver;

impl EffectResolver {
    /// Fire the `OnPlay` effect of the card at `index` in `owner`'s hand.
    pub fn on_play(session: &mut GameSession, owner: Side, index: usize) -> ResolveResult {
        Self::fire(session, owner, index, EffectTrigger::OnPlay)
    }

    /// Fire every `OnStand` effect in `owner`'s hand.
    pub fn on_stand(session: &mut GameSession, owner: Side) -> Vec<ResolveResult> {
        Self::fire_all(session, owner, EffectTrigger::OnStand)
    }

    /// Fire the round-outcome effects in `owner`'s hand for the given winner.
    pub fn on_round_end(session: &mut GameSession, owner: Side, winner: RoundWinner) -> Vec<ResolveResult> {
        let trigger = match (winner, owner) {
            (RoundWinner::Tie, _) => EffectTrigger::OnTie,
            (RoundWinner::Player, Side::Player) | (RoundWinner::Ai, Side::Ai) => EffectTrigger::OnRoundWin,
            _ => EffectTrigger::OnRoundLose,
        };
        Self::fire_all(session, owner, trigger)
    }

    fn fire_all(session: &mut GameSession, owner: Side, trigger: EffectTrigger) -> Vec<ResolveResult> {
        let count = session.combatant(owner).hand.len();
        (0..count)
            .map(|index| Self::fire(session, owner, index, trigger))
            .collect()
    }

    /// Fire one card's effect if `trigger` matches.
    pub fn fire(session: &mut GameSession, owner: Side, index: usize, trigger: EffectTrigger) -> ResolveResult {
        let Some(played) = session.combatant(owner).hand.cards().get(index) else {
            return ResolveResult::Skipped;
        };
        let Some(effect) = played.card.effect.clone() else {
            return ResolveResult::Skipped;
        };
        if effect.trigger != trigger || (played.effect_fired && !effect.is_persistent()) {
            return ResolveResult::Skipped;
        }
        let card_name = played.card.name.clone();

        let result = Self::apply(session, owner, index, &effect.kind);
        if result == ResolveResult::Success {
            if let Some(played) = session.combatant_mut(owner).hand.get_mut(index) {
                played.effect_fired = true;
            }
            debug!(%owner, card = %card_name, ?trigger, "effect fired");
        }
        result
    }

    fn apply(session: &mut GameSession, owner: Side, index: usize, kind: &EffectKind) -> ResolveResult {
        let player_only = |what: &str| ResolveResult::Failed(format!("{what} only applies to the player"));

        match kind {
            EffectKind::ModifyHandTotal { amount } => {
                session.log(format!("{owner}'s hand total shifts by {amount:+}"));
                ResolveResult::Success
            }

            EffectKind::GainChips { amount } => {
                if owner != Side::Player {
                    return player_only("Chips");
                }
                session.earn_chips(*amount);
                session.log(format!("You gain {amount} chips"));
                ResolveResult::Success
            }

            EffectKind::LoseChips { amount } => {
                if owner != Side::Player {
                    return player_only("Chips");
                }
                let lost = session.lose_chips(*amount);
                session.log(format!("You lose {lost} chips"));
                ResolveResult::Success
            }

            EffectKind::AutoWin => {
                if owner != Side::Player {
                    return player_only("Auto-win");
                }
                session.log("Auto-win! The round ends in your favor");
                ResolveResult::Success
            }

            EffectKind::GainShield { amount } => {
                if owner != Side::Player {
                    return player_only("Shields");
                }
                session.gain_shield(*amount);
                session.log(format!("You gain a {amount} HP shield"));
                ResolveResult::Success
            }

            EffectKind::DamageOpponent { amount } => {
                let target = owner.opponent();
                session.apply_damage(target, *amount);
                session.log(format!("{owner} deals {amount} direct damage to {target}"));
                ResolveResult::Success
            }

            EffectKind::HealPlayer { amount } => {
                let healed = session.combatant_mut(owner).heal(*amount);
                session.log(format!("{owner} heals {healed} HP"));
                ResolveResult::Success
            }

            EffectKind::RandomValue { low, high } => {
                let rolled = session.rng.gen_range_inclusive(*low, *high);
                match session.combatant_mut(owner).hand.get_mut(index) {
                    Some(played) => {
                        played.rolled_value = Some(f64::from(rolled));
                        session.log(format!("The card's value is {rolled}"));
                        ResolveResult::Success
                    }
                    None => ResolveResult::Failed("Card left the hand".to_string()),
                }
            }

            EffectKind::Summon { summon_type, amount } => {
                session
                    .combatant_mut(owner)
                    .status_effects
                    .push(StatusEffect::indefinite(summon_type.clone(), *amount));
                session.log(format!("{owner} summons a {summon_type} ({amount:+} to every hand)"));
                ResolveResult::Success
            }

            EffectKind::RemoveOpponentCard => {
                let target = owner.opponent();
                let opponent = session.combatant_mut(target);
                match opponent.hand.pop() {
                    Some(removed) => {
                        let name = removed.card.name.clone();
                        opponent.discard.push_back(removed.card);
                        session.log(format!("{name} is removed from {target}'s hand"));
                        ResolveResult::Success
                    }
                    None => ResolveResult::Failed("Opponent hand is empty".to_string()),
                }
            }
        }
    }
}
