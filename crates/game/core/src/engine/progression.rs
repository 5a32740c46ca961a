//! New-game setup, outcome detection, and stage advancement.

use crate::config::GameConfig;
use crate::env::{Board, RandomSource, place_units};
use crate::state::{GameState, PositionedUnit, Side, Unit};

use super::errors::ProgressionError;

/// Result of checking both rosters after a strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Both sides still have units.
    Continue,
    /// Opponent roster emptied below the final stage.
    StageCleared,
    /// Opponent roster emptied on the final stage.
    Victory,
    /// Home roster emptied while the opponent still stands.
    Defeat,
}

pub fn outcome(state: &GameState) -> Outcome {
    if state.opponent.is_empty() {
        if state.stage >= GameConfig::MAX_STAGE {
            Outcome::Victory
        } else {
            Outcome::StageCleared
        }
    } else if state.home.is_empty() {
        Outcome::Defeat
    } else {
        Outcome::Continue
    }
}

/// Summary of a completed stage transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageAdvance {
    pub stage: u32,
    pub score_gained: u32,
    pub survivors: usize,
    pub recruits: usize,
}

/// Builds a fresh stage-1 game: two generated rosters of
/// [`GameConfig::INITIAL_ROSTER_SIZE`] at level 1, home placed first.
pub fn new_game(board: &Board, rng: &mut dyn RandomSource) -> Result<GameState, ProgressionError> {
    let mut state = GameState::empty();
    let level = state.stage_level();

    let home = state.generate_units(Side::Home, level, GameConfig::INITIAL_ROSTER_SIZE, rng)?;
    let opponent =
        state.generate_units(Side::Opponent, level, GameConfig::INITIAL_ROSTER_SIZE, rng)?;

    deploy(&mut state, board, Side::Home, home, rng)?;
    deploy(&mut state, board, Side::Opponent, opponent, rng)?;
    Ok(state)
}

/// Enlists `units` on `side` and places them on that side's free spawn cells.
///
/// Placement is checked before anything is enlisted, so a failure leaves the
/// state untouched.
pub(crate) fn deploy(
    state: &mut GameState,
    board: &Board,
    side: Side,
    units: Vec<Unit>,
    rng: &mut dyn RandomSource,
) -> Result<(), ProgressionError> {
    let candidates = board.spawn_cells(side, &state.occupied_cells());
    let placed = place_units(units, candidates, rng)?;

    state
        .roster_mut(side)
        .add_all(placed.iter().map(|entry| entry.unit.id))?;
    state.positions.extend(placed);
    Ok(())
}

/// Moves to the next stage after the opponent roster was wiped out.
///
/// Survivors gain one level, the home roster is topped up to `stage + 1`,
/// a new opponent roster of `stage + 1` is generated, and both sides are
/// redeployed on fresh spawn cells. Score grows by the survivors' health
/// measured before leveling.
///
/// The transition is built on a copy and only written back once both sides
/// are placed, so an error leaves `state` as it was.
pub(crate) fn advance_stage(
    state: &mut GameState,
    board: &Board,
    rng: &mut dyn RandomSource,
) -> Result<StageAdvance, ProgressionError> {
    let mut next = state.clone();
    let report = advance_into(&mut next, board, rng)?;
    *state = next;
    Ok(report)
}

fn advance_into(
    state: &mut GameState,
    board: &Board,
    rng: &mut dyn RandomSource,
) -> Result<StageAdvance, ProgressionError> {
    let mut survivors: Vec<Unit> = std::mem::take(&mut state.positions)
        .into_iter()
        .map(|entry: PositionedUnit| entry.unit)
        .filter(|unit| state.home.contains(unit.id))
        .collect();

    let score_gained: u32 = survivors.iter().map(|unit| unit.health).sum();
    state.score += score_gained;
    state.stage = (state.stage + 1).min(GameConfig::MAX_STAGE);
    state.selected = None;
    state.turn_owner = Side::Home;

    survivors.iter_mut().for_each(Unit::level_up);
    let survivor_count = survivors.len();

    let level = state.stage_level();
    let roster_size = GameConfig::roster_size_for(state.stage);
    let recruits = roster_size.saturating_sub(survivor_count);
    survivors.extend(state.generate_units(Side::Home, level, recruits, rng)?);
    let opponent = state.generate_units(Side::Opponent, level, roster_size, rng)?;

    state.home.clear();
    state.opponent.clear();
    deploy(state, board, Side::Home, survivors, rng)?;
    deploy(state, board, Side::Opponent, opponent, rng)?;

    Ok(StageAdvance {
        stage: state.stage,
        score_gained,
        survivors: survivor_count,
        recruits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PlacementError, SeededRandom};

    #[test]
    fn new_game_has_two_units_per_side_on_spawn_columns() {
        let board = Board::new(8);
        let mut rng = SeededRandom::new(3);
        let state = new_game(&board, &mut rng).unwrap();

        assert_eq!(state.stage, 1);
        assert_eq!(state.home.len(), 2);
        assert_eq!(state.opponent.len(), 2);
        for entry in state.units_of(Side::Home) {
            assert!(board.index_to_coord(entry.position).col < 2);
        }
        for entry in state.units_of(Side::Opponent) {
            assert!(board.index_to_coord(entry.position).col >= 6);
        }
    }

    #[test]
    fn outcome_prefers_victory_checks_over_defeat() {
        let mut state = GameState::empty();
        assert_eq!(outcome(&state), Outcome::StageCleared);
        state.stage = GameConfig::MAX_STAGE;
        assert_eq!(outcome(&state), Outcome::Victory);
    }

    #[test]
    fn advance_from_stage_two_levels_survivors_and_regenerates() {
        let board = Board::new(8);
        let mut rng = SeededRandom::new(9);
        let mut state = new_game(&board, &mut rng).unwrap();
        state.stage = 2;

        let wiped: Vec<_> = state.units_of(Side::Opponent).map(|e| e.position).collect();
        for cell in wiped {
            state.remove_unit_at(cell);
        }
        let home_cell = state.units_of(Side::Home).next().unwrap().position;
        state.unit_at_mut(home_cell).unwrap().unit.health = 60;
        let levels_before: Vec<u8> = state.units_of(Side::Home).map(|e| e.unit.level).collect();

        let report = advance_stage(&mut state, &board, &mut rng).unwrap();

        assert_eq!(report.stage, 3);
        assert_eq!(report.score_gained, 160);
        assert_eq!((report.survivors, report.recruits), (2, 2));
        assert_eq!(state.opponent.len(), 4);
        assert_eq!(state.home.len(), 4);
        assert!(state.units_of(Side::Opponent).all(|e| e.unit.level == 3));
        let levels_after: Vec<u8> = state
            .units_of(Side::Home)
            .take(2)
            .map(|e| e.unit.level)
            .collect();
        assert_eq!(
            levels_after,
            levels_before.iter().map(|l| l + 1).collect::<Vec<_>>()
        );
        assert_eq!(state.turn_owner, Side::Home);
        assert_eq!(state.positions.len(), 8);
    }

    fn clear_opponents(state: &mut GameState) {
        let wiped: Vec<_> = state.units_of(Side::Opponent).map(|e| e.position).collect();
        for cell in wiped {
            state.remove_unit_at(cell);
        }
    }

    #[test]
    fn smallest_board_reaches_the_final_stage() {
        let board = Board::new(GameConfig::MIN_BOARD_SIZE);
        for seed in 0..50 {
            let mut rng = SeededRandom::new(seed);
            let mut state = new_game(&board, &mut rng).unwrap();
            state.stage = GameConfig::MAX_STAGE - 1;
            clear_opponents(&mut state);

            let report = advance_stage(&mut state, &board, &mut rng).unwrap();

            assert_eq!(report.stage, GameConfig::MAX_STAGE);
            let roster = GameConfig::roster_size_for(GameConfig::MAX_STAGE);
            assert_eq!(state.home.len(), roster);
            assert_eq!(state.opponent.len(), roster);
            assert_eq!(state.positions.len(), 2 * roster);
        }
    }

    #[test]
    fn failed_advance_leaves_the_state_untouched() {
        // Both sides spawn over the whole 2x2 board, so the stage-3 opponent
        // roster finds no free cell once home is placed.
        let board = Board::new(2);
        let mut rng = SeededRandom::new(5);
        let mut state = new_game(&board, &mut rng).unwrap();
        state.stage = 2;
        state.score = 40;
        clear_opponents(&mut state);
        let before = state.clone();

        let err = advance_stage(&mut state, &board, &mut rng).unwrap_err();

        assert!(matches!(
            err,
            ProgressionError::Placement(PlacementError::InsufficientSpawnSlots {
                roster: 4,
                available: 0
            })
        ));
        assert_eq!(state, before);
        assert_eq!(state.stage, 2);
        assert_eq!(state.score, 40);
        assert_eq!(state.positions.len(), 2);
        assert_eq!(state.home.len(), 2);
        assert!(state.opponent.is_empty());
    }

    #[test]
    fn failed_deploy_enlists_nobody() {
        let board = Board::new(2);
        let mut rng = SeededRandom::new(1);
        let mut state = new_game(&board, &mut rng).unwrap();
        let before = state.clone();
        let extra = state.generate_units(Side::Opponent, 1, 3, &mut rng).unwrap();
        let allocated = state.clone();

        let err = deploy(&mut state, &board, Side::Opponent, extra, &mut rng).unwrap_err();

        assert!(matches!(err, ProgressionError::Placement(_)));
        assert_eq!(state, allocated);
        assert_eq!(state.positions, before.positions);
        assert_eq!(state.opponent, before.opponent);
        assert_eq!(state.home, before.home);
    }
}
