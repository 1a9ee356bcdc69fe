//! Property tests for deck operations, hand evaluation, the outcome table
//! and the round state machine.

use std::collections::HashMap;

use blackjack_battler::ai::{should_hit, DecisionContext};
use blackjack_battler::cards::{create_standard_deck, shuffle_deck, standard_card, Suit};
use blackjack_battler::core::{GameRng, SessionConfig};
use blackjack_battler::rules::{calculate_total, is_bust, resolve_outcome, PlayedCard};
use blackjack_battler::session::{GameSession, RoundPhase};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Generators
// ─────────────────────────────────────────────────────────────────────────────

fn arb_suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::STANDARD.to_vec())
}

/// A hand of 0-6 standard cards (rank 1 = Ace).
fn arb_hand() -> impl Strategy<Value = Vec<PlayedCard>> {
    prop::collection::vec((1u8..=13, arb_suit()), 0..=6).prop_map(|cards| {
        cards
            .into_iter()
            .map(|(rank, suit)| PlayedCard::new(standard_card(rank, suit)))
            .collect()
    })
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Hit,
    Stand,
    Advance(u64),
    ResetRound,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Hit),
        2 => Just(Action::Stand),
        3 => (0u64..3000).prop_map(Action::Advance),
        1 => Just(Action::ResetRound),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ─────────────────────────────────────────────────────────────────────────
    // Deck
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn prop_standard_deck_is_canonical(seed in any::<u64>()) {
        let deck = create_standard_deck(&mut GameRng::new(seed));
        prop_assert_eq!(deck.len(), 52);

        let mut counts: HashMap<(String, Suit), usize> = HashMap::new();
        for card in &deck {
            *counts.entry((card.name.clone(), card.suit)).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), 52);
        prop_assert!(counts.values().all(|&n| n == 1));
    }

    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>(), other in any::<u64>()) {
        let deck = create_standard_deck(&mut GameRng::new(seed));
        let original = deck.clone();

        let shuffled = shuffle_deck(&deck, &mut GameRng::new(other));

        prop_assert_eq!(&deck, &original);
        let mut a: Vec<String> = shuffled.iter().map(|c| format!("{c}")).collect();
        let mut b: Vec<String> = original.iter().map(|c| format!("{c}")).collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hand evaluation
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn prop_flexible_cards_resolve_greedily(hand in arb_hand()) {
        let total = calculate_total(&hand);
        let low: f64 = hand.iter().map(|p| p.card.value.low()).sum();

        let aces = hand.iter().filter(|p| p.card.value.is_flexible()).count();

        // At most one Ace can count high without passing 21 by itself
        prop_assert!(total == low || total == low + 10.0);
        if aces == 0 {
            prop_assert_eq!(total, low);
        }
        if aces == 1 && total > low {
            prop_assert!(total <= 21.0);
        }
        if hand.is_empty() {
            prop_assert_eq!(total, 0.0);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Outcome table
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn prop_outcome_damages_at_most_one_side(
        player in 0u32..=30,
        ai in 0u32..=30,
        bonus in 0i32..=10,
        auto_win in any::<bool>(),
    ) {
        let (p, a) = (f64::from(player), f64::from(ai));
        let outcome = resolve_outcome(p, a, bonus, auto_win, 10);

        prop_assert!(outcome.damage_to_player >= 0);
        prop_assert!(outcome.damage_to_ai >= 0);
        prop_assert!(outcome.damage_to_player == 0 || outcome.damage_to_ai == 0);
        if is_bust(p) && !auto_win {
            prop_assert_eq!(outcome.chips_earned, 0);
        }
        if outcome.chips_earned > 0 {
            prop_assert!(outcome.bonus_spent);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI policy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn prop_ai_never_hits_at_21_or_above(
        seed in any::<u64>(),
        encounter in 1u32..=16,
        ai_total in 21u32..=30,
        player_total in 0u32..=30,
        hand_size in 0usize..6,
    ) {
        let mut rng = GameRng::new(seed);
        let ctx = DecisionContext {
            hand_size,
            ai_total: f64::from(ai_total),
            player_total: f64::from(player_total),
            encounter,
        };
        prop_assert!(!should_hit(&ctx, &mut rng));
    }

    #[test]
    fn prop_ai_always_hits_short_hand(seed in any::<u64>(), encounter in 1u32..=16, ai_total in 0u32..21) {
        let mut rng = GameRng::new(seed);
        let ctx = DecisionContext {
            hand_size: 1,
            ai_total: f64::from(ai_total),
            player_total: 0.0,
            encounter,
        };
        prop_assert!(should_hit(&ctx, &mut rng));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn prop_session_invariants_hold(
        seed in any::<u64>(),
        actions in prop::collection::vec(arb_action(), 1..80),
    ) {
        let mut s = GameSession::new(SessionConfig::default().with_seed(seed));

        for action in actions {
            let before = s.snapshot();
            match action {
                Action::Hit => s.hit(),
                Action::Stand => s.stand(),
                Action::Advance(ms) => s.advance(ms),
                Action::ResetRound => s.reset_round(),
            }

            // Out-of-phase player actions change nothing
            let acting = matches!(action, Action::Hit | Action::Stand);
            if acting && (before.phase != RoundPhase::PlayerTurn || before.player_stood) {
                prop_assert_eq!(&s.snapshot(), &before);
            }

            let snap = s.snapshot();
            prop_assert!((0..=snap.player.max_hp).contains(&snap.player.hp));
            prop_assert!((0..=snap.ai.max_hp).contains(&snap.ai.hp));
            prop_assert!(snap.shield >= 0);
            prop_assert!(snap.bonus_damage >= 0);
            prop_assert!(snap.encounter >= 1 && snap.encounter <= snap.max_encounters);
        }
    }
}
