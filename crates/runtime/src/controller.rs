//! The session controller: turn state machine and input handlers.
//!
//! [`GameController`] owns the only [`GameState`]. Front-ends call the named
//! handlers (or [`GameController::dispatch`]) and never touch the state
//! directly. Every handler runs to completion, including the opponent's reply
//! turn, before it returns.
//!
//! ```text
//! SelectingOwn --click own unit--> SelectingOwn (selection set)
//! SelectingOwn --legal move/attack--> TurnSwitch --> ActingOpponent
//! ActingOpponent --zero or one action--> TurnSwitch --> SelectingOwn
//! any --final stage cleared--> Blocked
//! ```

use std::sync::Arc;

use game_core::{
    Action, Board, CellIndex, GameEngine, GameState, Outcome, PendingStrike, RandomSource, Side,
    StrikeReport, new_game,
};
use tracing::{debug, info, warn};

use crate::api::{
    ActionProvider, CursorKind, Highlight, InputEvent, PresentationGateway, Result, Theme,
    hover_feedback, tooltip,
};
use crate::events::{CombatEvent, Event, EventBus, ProgressionEvent, SessionEvent, Topic};
use crate::repository::SaveRepository;
use crate::runtime::RuntimeBuilder;

/// Highlights that only live while the pointer is over a cell.
const HOVER_HIGHLIGHTS: Highlight = Highlight::GREEN.union(Highlight::RED);

pub struct GameController {
    board: Board,
    state: GameState,
    rng: Box<dyn RandomSource>,
    presentation: Arc<dyn PresentationGateway>,
    repository: Arc<dyn SaveRepository>,
    opponent: Box<dyn ActionProvider>,
    events: EventBus,
}

impl GameController {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub(crate) fn from_parts(
        board: Board,
        state: GameState,
        rng: Box<dyn RandomSource>,
        presentation: Arc<dyn PresentationGateway>,
        repository: Arc<dyn SaveRepository>,
        opponent: Box<dyn ActionProvider>,
        events: EventBus,
    ) -> Self {
        Self {
            board,
            state,
            rng,
            presentation,
            repository,
            opponent,
            events,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Draws the current game for the first time.
    pub fn start(&self) {
        self.draw_everything();
        self.events.publish(SessionEvent::GameStarted);
        info!(stage = self.state.stage, "game started");
    }

    /// Routes an input event to its handler.
    pub async fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::CellEnter(cell) => {
                self.on_cell_enter(cell);
                Ok(())
            }
            InputEvent::CellLeave(cell) => {
                self.on_cell_leave(cell);
                Ok(())
            }
            InputEvent::CellClick(cell) => self.on_cell_click(cell).await,
            InputEvent::NewGame => self.on_new_game(),
            InputEvent::SaveGame => self.on_save_game(),
            InputEvent::LoadGame => self.on_load_game().await,
        }
    }

    /// Tooltip, cursor, and move/attack hint for the hovered cell.
    pub fn on_cell_enter(&self, cell: CellIndex) {
        if !self.board.contains(cell) {
            return;
        }
        if let Some(entry) = self.state.unit_at(cell) {
            self.presentation.show_tooltip(&tooltip(&entry.unit), cell);
        }

        let feedback = hover_feedback(&self.state, &self.board, cell);
        self.presentation.set_cursor(feedback.cursor);
        if let Some(color) = feedback.highlight {
            self.presentation.select_cell(cell, color);
        }
    }

    pub fn on_cell_leave(&self, cell: CellIndex) {
        self.presentation.hide_tooltip(cell);
        self.presentation.set_cursor(CursorKind::Auto);
        self.presentation.deselect_by_color(HOVER_HIGHLIGHTS);
    }

    /// Selects a home unit, or acts with the selected one.
    ///
    /// An illegal click with a selection is reported through `show_error`
    /// and changes nothing; the turn stays with the player.
    pub async fn on_cell_click(&mut self, cell: CellIndex) -> Result<()> {
        if self.state.blocked {
            debug!(%cell, "click ignored, game is over");
            return Ok(());
        }
        if !self.board.contains(cell) {
            self.presentation.show_error("That cell is not on the board");
            return Ok(());
        }
        if self.state.turn_owner != Side::Home {
            debug!(%cell, "click ignored, opponent is acting");
            return Ok(());
        }

        if self.state.side_at(cell) == Some(Side::Home) {
            self.presentation
                .deselect_by_color(Highlight::YELLOW | Highlight::GREEN);
            GameEngine::new(&mut self.state, &self.board)
                .select(cell)
                .map_err(game_core::ExecuteError::from)?;
            self.presentation.select_cell(cell, Highlight::YELLOW);
            debug!(%cell, "unit selected");
            return Ok(());
        }

        if self.state.selected.is_none() {
            debug!(%cell, "click ignored, nothing selected");
            return Ok(());
        }

        let intent = GameEngine::new(&mut self.state, &self.board).intent_for(cell);
        let action = match intent {
            Ok(action) => action,
            Err(error) => {
                debug!(%cell, %error, "invalid action");
                self.presentation
                    .show_error(&format!("Invalid move or the cell is taken: {error}"));
                return Ok(());
            }
        };

        match self.perform(action).await? {
            Outcome::Continue => {
                self.pass_turn();
                self.run_opponent_turn().await
            }
            _ => Ok(()),
        }
    }

    /// Discards the current game and starts stage 1 with fresh rosters.
    pub fn on_new_game(&mut self) -> Result<()> {
        self.reset()?;
        self.presentation.show_message("Stage 1");
        self.events.publish(SessionEvent::GameStarted);
        info!("new game started");
        Ok(())
    }

    pub fn on_save_game(&self) -> Result<()> {
        if let Err(error) = self.repository.save(&self.state.to_saved()) {
            warn!(%error, "save failed");
            self.presentation.show_error(&format!("Could not save: {error}"));
            return Err(error.into());
        }
        self.presentation.show_message("Game saved");
        self.events.publish(SessionEvent::GameSaved);
        info!(stage = self.state.stage, score = self.state.score, "game saved");
        Ok(())
    }

    /// Replaces the game with the saved one.
    ///
    /// Unknown unit types and other bad rows are skipped and reported. A
    /// restored game with an emptied roster is settled at once like a
    /// finished strike. When the save was taken on the opponent's turn, that
    /// turn runs right away.
    pub async fn on_load_game(&mut self) -> Result<()> {
        let saved = match self.repository.load() {
            Ok(saved) => saved,
            Err(error) => {
                warn!(%error, "load failed");
                self.presentation.show_error(&format!("Could not load: {error}"));
                return Err(error.into());
            }
        };

        let Some(restored) = saved.and_then(|game| game.restore(&self.board)) else {
            self.presentation.show_error("No saved game available");
            return Ok(());
        };

        for issue in &restored.issues {
            warn!(%issue, "skipped saved unit");
        }
        if !restored.issues.is_empty() {
            let details: Vec<String> = restored.issues.iter().map(ToString::to_string).collect();
            self.presentation.show_error(&format!(
                "Skipped {} saved unit(s): {}",
                restored.issues.len(),
                details.join("; ")
            ));
        }

        self.state = restored.state;
        self.draw_everything();
        self.presentation.show_message("Saved game loaded");
        self.events.publish(SessionEvent::GameLoaded {
            stage: self.state.stage,
            skipped_units: restored.issues.len(),
        });
        info!(stage = self.state.stage, "game loaded");

        if self.state.blocked {
            return Ok(());
        }
        match self.settle()? {
            Outcome::Continue => self.run_opponent_turn().await,
            _ => Ok(()),
        }
    }

    /// Plays the opponent's single action and hands the turn back.
    ///
    /// A no-op when the game is blocked or it is not the opponent's turn.
    pub async fn run_opponent_turn(&mut self) -> Result<()> {
        if self.state.blocked || self.state.turn_owner != Side::Opponent {
            debug!("opponent turn skipped");
            return Ok(());
        }

        let action = self
            .opponent
            .provide_action(&self.state, &self.board, self.rng.as_mut())
            .await?;

        match action {
            Some(action) => {
                if self.perform(action).await? != Outcome::Continue {
                    return Ok(());
                }
            }
            None => debug!("opponent has no legal action"),
        }

        self.pass_turn();
        Ok(())
    }

    /// Executes a validated action for the side whose turn it is.
    async fn perform(&mut self, action: Action) -> Result<Outcome> {
        let side = self.state.turn_owner;
        match action {
            Action::Move(step) => {
                GameEngine::new(&mut self.state, &self.board).move_unit(step)?;
                if side == Side::Home {
                    self.presentation.deselect_cell(step.from);
                    self.presentation.select_cell(step.to, Highlight::YELLOW);
                }
                self.presentation.redraw(&self.state.positions);
                self.events.publish(CombatEvent::UnitMoved {
                    side,
                    from: step.from,
                    to: step.to,
                });
                Ok(Outcome::Continue)
            }
            Action::Attack(attack) => {
                let strike = GameEngine::new(&mut self.state, &self.board).resolve_attack(attack)?;
                self.strike(strike).await?;
                self.settle()
            }
        }
    }

    /// Plays the damage cue, then lands the strike and redraws.
    async fn strike(&mut self, strike: PendingStrike) -> Result<StrikeReport> {
        self.presentation
            .show_damage(strike.target, strike.damage)
            .await;

        let victim = self
            .state
            .unit_at(strike.target)
            .map(|entry| (entry.unit.kind, entry.unit.side()));
        let report = GameEngine::new(&mut self.state, &self.board).commit_attack(strike)?;

        self.events.publish(CombatEvent::UnitAttacked {
            attacker: strike.attacker,
            target: strike.target,
            damage: report.damage,
            remaining_health: report.remaining_health,
        });
        if report.defeated {
            self.presentation.deselect_cell(strike.target);
            if let Some((kind, side)) = victim {
                self.events.publish(CombatEvent::UnitDefeated {
                    kind,
                    side,
                    cell: strike.target,
                });
            }
        }
        debug!(
            cell = %strike.target,
            damage = report.damage,
            remaining = report.remaining_health,
            "strike landed"
        );

        self.presentation.redraw(&self.state.positions);
        Ok(report)
    }

    /// Checks both rosters and applies the consequence.
    fn settle(&mut self) -> Result<Outcome> {
        let outcome = GameEngine::new(&mut self.state, &self.board).outcome();
        match outcome {
            Outcome::Continue => {}
            Outcome::StageCleared => {
                let advance =
                    GameEngine::new(&mut self.state, &self.board).advance_stage(self.rng.as_mut())?;
                self.draw_everything();
                self.presentation.show_message(&format!(
                    "Stage cleared! Stage {} begins (+{} points)",
                    advance.stage, advance.score_gained
                ));
                self.events.publish(ProgressionEvent::StageAdvanced {
                    stage: advance.stage,
                    score: self.state.score,
                });
                info!(
                    stage = advance.stage,
                    score = self.state.score,
                    recruits = advance.recruits,
                    "stage advanced"
                );
            }
            Outcome::Victory => {
                GameEngine::new(&mut self.state, &self.board).block();
                self.presentation
                    .show_message("Victory! All enemies have been defeated!");
                self.events.publish(ProgressionEvent::Victory {
                    score: self.state.score,
                });
                info!(score = self.state.score, "final stage cleared");
            }
            Outcome::Defeat => {
                let stage = self.state.stage;
                self.presentation
                    .show_message("Defeat! Your team has fallen. A new game begins.");
                self.events.publish(ProgressionEvent::Defeat { stage });
                info!(stage, "home roster wiped out");
                self.reset()?;
                self.events.publish(SessionEvent::GameStarted);
            }
        }
        Ok(outcome)
    }

    fn pass_turn(&mut self) {
        let owner = GameEngine::new(&mut self.state, &self.board).pass_turn();
        self.events.publish(SessionEvent::TurnPassed { owner });
        debug!(%owner, "turn passed");
    }

    /// Replaces the state wholesale with a fresh stage-1 game.
    fn reset(&mut self) -> Result<()> {
        self.state = new_game(&self.board, self.rng.as_mut())?;
        self.draw_everything();
        Ok(())
    }

    fn draw_everything(&self) {
        self.presentation
            .draw_board(Theme::for_stage(self.state.stage));
        self.presentation.deselect_by_color(Highlight::all());
        self.presentation.redraw(&self.state.positions);
        if let Some(cell) = self.state.selected {
            self.presentation.select_cell(cell, Highlight::YELLOW);
        }
    }
}

