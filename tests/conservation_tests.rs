//! Conservation properties over random play.
//!
//! From any freshly dealt game, every sequence of accepted moves keeps
//! the full-deck census intact: hands + draw pile + discard pile + all
//! zone-held cards always total the standard 106 cards.

use proptest::prelude::*;

use bornes::{
    apply_move, EngineError, GameConfig, GameState, GameStatus, Move, PlayerSpec, TeamId,
    STANDARD_DECK_SIZE,
};

fn config(players: usize, teams: u8) -> GameConfig {
    let specs: Vec<_> = (0..players)
        .map(|i| PlayerSpec::human(format!("p{i}")))
        .collect();
    GameConfig::new(1000, 5000, teams, specs).unwrap()
}

/// All moves the acting player could plausibly submit, legal or not.
fn candidate_moves(state: &GameState) -> Vec<Move> {
    let turn = state.turn();
    let teams = state.config().num_teams() as usize;

    let mut moves = vec![Move::draw(turn)];
    for &card in state.hand(turn) {
        moves.push(Move::discard(turn, card));
        for team in TeamId::all(teams) {
            moves.push(Move::card(turn, card, team));
        }
    }
    moves
}

fn assert_census_intact(state: &GameState) {
    state.check_invariants().unwrap();
    let total: usize = state.card_census().values().sum();
    assert_eq!(total, STANDARD_DECK_SIZE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Dealing conserves the deck for every table size and seed.
    #[test]
    fn deal_conserves_the_deck(seed in any::<u64>(), players in prop::sample::select(vec![2usize, 3, 4, 6])) {
        let teams = if players == 3 { 3 } else { 2 };
        let state = GameState::new(config(players, teams), seed).unwrap();

        assert_census_intact(&state);
        prop_assert_eq!(state.draw_pile().len(), STANDARD_DECK_SIZE - 6 * players);
    }

    /// A random walk of accepted moves never breaks conservation, and
    /// rejected moves never change the state.
    #[test]
    fn random_walk_conserves_the_deck(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 120),
    ) {
        let mut state = GameState::new(config(4, 2), seed).unwrap();

        for &pick in &picks {
            if state.status() != GameStatus::InProgress {
                break;
            }

            let candidates = candidate_moves(&state);
            let base = pick % candidates.len();
            let mut accepted = None;
            for offset in 0..candidates.len() {
                let mv = candidates[(base + offset) % candidates.len()];
                match apply_move(&state, &mv) {
                    Ok(next) => {
                        accepted = Some(next);
                        break;
                    }
                    Err(EngineError::Rejected(_)) => {}
                    Err(EngineError::Invariant(violation)) => {
                        panic!("invariant violation on {mv:?}: {violation}");
                    }
                }
            }

            // Draw or discard is always available mid-round, so a running
            // game always has an accepted candidate.
            let next = accepted.expect("no candidate move was accepted");
            assert_census_intact(&next);
            state = next;
        }
    }

    /// Score rows stay in lockstep however many rounds a walk finishes.
    #[test]
    fn score_rows_stay_in_lockstep(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 200),
    ) {
        let mut state = GameState::new(config(2, 2), seed).unwrap();

        for &pick in &picks {
            if state.status() != GameStatus::InProgress {
                break;
            }
            let candidates = candidate_moves(&state);
            let base = pick % candidates.len();
            for offset in 0..candidates.len() {
                let mv = candidates[(base + offset) % candidates.len()];
                if let Ok(next) = apply_move(&state, &mv) {
                    state = next;
                    break;
                }
            }

            let rows: Vec<usize> = state
                .scores()
                .iter()
                .map(|(_, row)| row.len())
                .collect();
            prop_assert!(rows.windows(2).all(|w| w[0] == w[1]), "rows drifted: {rows:?}");
        }
    }
}
