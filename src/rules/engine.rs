//! The move validator and transition engine.
//!
//! Single entry point: [`apply_move`]. Given an immutable [`GameState`]
//! and a proposed [`Move`], it either produces a fully validated successor
//! state or a typed refusal:
//!
//! - [`MoveRejection`] — the player asked for something illegal; the prior
//!   state is untouched and the caller re-prompts.
//! - [`InvariantViolation`] — the successor failed its structural
//!   re-check; the engine itself is defective and the game is corrupted.
//!
//! The validation pipeline: game-over check, turn check (with the
//! coup fourre exception), card-in-hand check, category-specific zone
//! legality, then the successor is built and every structural invariant is
//! re-verified before it is returned.

use thiserror::Error;

use crate::cards::{Card, Control};
use crate::core::moves::{Move, MoveRejection, Play};
use crate::core::state::{CoupWindow, GameState, GameStatus, InvariantViolation, MAX_HAND_SIZE};
use crate::core::player::{PlayerId, TeamId};

use super::scoring::{score_round, BonusSchedule};

/// Failure of [`apply_move`], keeping user mistakes and engine defects
/// on separate arms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move is illegal; expected and recoverable.
    #[error(transparent)]
    Rejected(#[from] MoveRejection),
    /// The successor state failed validation; fatal.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Validate a move and compute the successor state.
///
/// The input state is never mutated; on success a new state is returned
/// with the card routed to the discard pile or the target zone's permanent
/// state, turn order advanced, and (when a team lands exactly on the race
/// distance) the round scored for every team.
///
/// # Errors
///
/// [`EngineError::Rejected`] for every illegal play;
/// [`EngineError::Invariant`] if the computed successor breaks a
/// structural invariant.
pub fn apply_move(state: &GameState, mv: &Move) -> Result<GameState, EngineError> {
    if matches!(state.status, GameStatus::Complete { .. }) {
        return Err(MoveRejection::GameComplete.into());
    }
    if mv.player.index() >= state.config.player_count() {
        return Err(MoveRejection::NotYourTurn.into());
    }
    if mv.player != state.turn {
        return apply_coup_fourre(state, mv);
    }

    let mut next = state.clone();
    match mv.play {
        Play::Draw => {
            if next.hands[mv.player].len() >= MAX_HAND_SIZE {
                return Err(MoveRejection::HandFull.into());
            }
            let card = next
                .draw_pile
                .pop_back()
                .ok_or(MoveRejection::DrawPileEmpty)?;
            next.hands[mv.player].push_back(card);
            next.coup_window = None;
        }
        Play::Discard { card } => {
            ensure_drawn(&next, mv.player)?;
            remove_from_hand(&mut next, mv.player, card)?;
            next.discard_pile.push_back(card);
            next.coup_window = None;
            advance_turn(&mut next);
            if round_exhausted(&next) {
                complete_round(&mut next, None)?;
            }
        }
        Play::Card { card, target } => {
            let coup_fourre = is_coup_fourre(&next, mv.player, card, target);
            // Safeties are exempt from the draw-first rule: a coup fourre
            // has to land before anything else happens in the turn.
            if !matches!(card, Card::Safety(_)) {
                ensure_drawn(&next, mv.player)?;
            }
            check_target(&next, mv.player, card, target)?;
            remove_from_hand(&mut next, mv.player, card)?;

            let race_distance = next.config.race_distance();
            let zone = &mut next.zones[target];
            let mut trip_complete = false;
            match card {
                Card::Distance(d) => {
                    trip_complete = zone.play_distance(d, race_distance)?;
                }
                Card::Hazard(h) => {
                    zone.apply_hazard(h)?;
                }
                Card::Remedy(r) => {
                    let cleared = zone.apply_remedy(r)?;
                    next.discard_pile.push_back(Card::Hazard(cleared));
                    next.discard_pile.push_back(card);
                }
                Card::Control(Control::Roll) => {
                    zone.roll()?;
                    next.discard_pile.push_back(card);
                }
                Card::Control(Control::Stop) => {
                    zone.stop()?;
                    next.discard_pile.push_back(card);
                }
                Card::Control(Control::SpeedLimit) => {
                    zone.apply_speed_limit()?;
                    next.discard_pile.push_back(card);
                }
                Card::Control(Control::EndOfLimit) => {
                    zone.end_speed_limit()?;
                    next.discard_pile.push_back(card);
                }
                Card::Safety(s) => {
                    if let Some(cleared) = zone.play_safety(s, coup_fourre) {
                        next.discard_pile.push_back(Card::Hazard(cleared));
                    }
                }
            }

            // A landed attack opens the coup fourre window for the target
            // team; anything else closes whatever window was open.
            next.coup_window = card
                .attack()
                .map(|attack| CoupWindow { team: target, attack });

            // A coup fourre is an interjection: the interrupted turn
            // sequence resumes, unless the counter spent the actor's
            // last card with nothing left to draw.
            if !coup_fourre
                || (next.draw_pile.is_empty() && next.hands[mv.player].is_empty())
            {
                advance_turn(&mut next);
            }
            if trip_complete {
                complete_round(&mut next, Some(target))?;
            } else if round_exhausted(&next) {
                complete_round(&mut next, None)?;
            }
        }
    }

    finish(next)
}

/// The out-of-turn path: only a matching coup fourre is entertained.
fn apply_coup_fourre(state: &GameState, mv: &Move) -> Result<GameState, EngineError> {
    let Play::Card { card, target } = mv.play else {
        return Err(MoveRejection::NotYourTurn.into());
    };
    let Card::Safety(safety) = card else {
        return Err(MoveRejection::NotYourTurn.into());
    };
    if state.coup_window.is_none() {
        return Err(MoveRejection::NotYourTurn.into());
    }
    if !is_coup_fourre(state, mv.player, card, target) {
        return Err(MoveRejection::NotCoupFourre.into());
    }

    let mut next = state.clone();
    remove_from_hand(&mut next, mv.player, card)?;
    if let Some(cleared) = next.zones[target].play_safety(safety, true) {
        next.discard_pile.push_back(Card::Hazard(cleared));
    }
    // The interrupted turn sequence resumes: no turn advance.
    next.coup_window = None;

    finish(next)
}

/// Whether playing `card` at `target` counters the open coup fourre
/// window: the actor sits on the victimized team, targets its own zone,
/// and the safety counters the attack that just landed.
fn is_coup_fourre(state: &GameState, player: PlayerId, card: Card, target: TeamId) -> bool {
    let Card::Safety(safety) = card else {
        return false;
    };
    let Some(window) = state.coup_window else {
        return false;
    };
    state.config.team_of(player) == window.team
        && target == window.team
        && safety.counters(window.attack)
}

/// The round is exhausted when nothing is left to draw or play.
fn round_exhausted(state: &GameState) -> bool {
    state.draw_pile.is_empty() && state.hands.iter().all(|(_, hand)| hand.is_empty())
}

/// The turn's draw must happen before a play or discard while cards
/// remain to draw.
fn ensure_drawn(state: &GameState, player: PlayerId) -> Result<(), MoveRejection> {
    if state.hands[player].len() < MAX_HAND_SIZE && !state.draw_pile.is_empty() {
        return Err(MoveRejection::MustDrawFirst);
    }
    Ok(())
}

/// Attacks target an opposing zone; everything else targets one's own.
fn check_target(
    state: &GameState,
    player: PlayerId,
    card: Card,
    target: TeamId,
) -> Result<(), MoveRejection> {
    let own = state.config.team_of(player);
    let legal = if target.index() >= state.config.num_teams() as usize {
        false
    } else if card.attack().is_some() {
        target != own
    } else {
        target == own
    };

    if legal {
        Ok(())
    } else {
        Err(MoveRejection::WrongTarget { card, target })
    }
}

fn remove_from_hand(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
) -> Result<(), MoveRejection> {
    let hand = &mut state.hands[player];
    match hand.iter().position(|&c| c == card) {
        Some(pos) => {
            hand.remove(pos);
            Ok(())
        }
        None => Err(MoveRejection::CardNotInHand { card }),
    }
}

fn advance_turn(state: &mut GameState) {
    let count = state.config.player_count();
    let mut next = (state.turn.index() + 1) % count;
    if state.draw_pile.is_empty() {
        // Once the pile is dry a seat can run out of cards entirely;
        // such a seat has no legal move and is skipped. With every hand
        // empty the landing seat is irrelevant: the exhaustion check
        // completes the round.
        for _ in 0..count {
            if !state.hands[PlayerId::new(next as u8)].is_empty() {
                break;
            }
            next = (next + 1) % count;
        }
    }
    state.turn = PlayerId::new(next as u8);
}

/// Score every team for the finished round, then either retire the game
/// or re-deal the next round.
///
/// `completing` is the team that landed exactly on the race distance, or
/// `None` when the round ended by exhaustion.
fn complete_round(next: &mut GameState, completing: Option<TeamId>) -> Result<(), EngineError> {
    let schedule = BonusSchedule::STANDARD;
    let shutout = completing.map_or(false, |winner| {
        next.zones
            .iter()
            .all(|(team, zone)| team == winner || zone.distance_cards().is_empty())
    });

    let totals: Vec<(TeamId, u32)> = next
        .zones
        .iter()
        .map(|(team, zone)| {
            let hand_cards = next
                .config
                .team_members(team)
                .flat_map(|p| next.hands[p].iter());
            let trip_complete = completing == Some(team);
            let score = score_round(
                zone,
                hand_cards,
                trip_complete,
                trip_complete && shutout,
                &schedule,
            );
            (team, score.total())
        })
        .collect();

    for (team, total) in totals {
        next.scores[team].push_back(total);
    }

    let goal = next.config.points_goal();
    let mut winner: Option<(TeamId, u32)> = None;
    for team in next.scores.team_ids() {
        let cumulative = next.cumulative_score(team);
        if cumulative >= goal && winner.map_or(true, |(_, best)| cumulative > best) {
            winner = Some((team, cumulative));
        }
    }

    match winner {
        Some((team, cumulative)) => {
            tracing::debug!(
                round = next.round,
                winner = team.index(),
                cumulative,
                "game complete"
            );
            next.status = GameStatus::Complete { winner: team };
        }
        None => {
            tracing::debug!(round = next.round, "round complete, redealing");
            next.reset_round().map_err(InvariantViolation::Redeal)?;
        }
    }

    Ok(())
}

/// Re-verify every structural invariant before releasing the successor.
fn finish(next: GameState) -> Result<GameState, EngineError> {
    if let Err(violation) = next.check_invariants() {
        tracing::error!(%violation, "state invariant broken after transition");
        return Err(EngineError::Invariant(violation));
    }
    Ok(next)
}
