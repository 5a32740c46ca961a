//! Glue code tying the controller, save slot, and terminal UI together.
use std::sync::Arc;

use anyhow::Result;
use crossterm::event as term_event;
use game_core::Board;
use runtime::{Event, FileSaveRepository, GameController, Topic};
use tokio::{
    sync::broadcast::{self, error::TryRecvError},
    time::{self, Duration},
};

use crate::config::CliConfig;
use crate::input::{Command, InputHandler};
use crate::presentation::{
    CliEventConsumer, MessageLevel, Status, TerminalPresentation, terminal::Tui,
};

const FRAME_INTERVAL_MS: u64 = 16;

pub struct CliApp {
    controller: GameController,
    presentation: Arc<TerminalPresentation>,
    input: InputHandler,
    consumer: CliEventConsumer,
    combat_rx: broadcast::Receiver<Event>,
}

impl CliApp {
    pub fn new(config: CliConfig, terminal: Tui) -> Result<Self> {
        let board = Board::from_config(&config.runtime.game_config);
        let presentation = TerminalPresentation::new(
            terminal,
            board,
            config.damage_delay,
            config.message_capacity,
        );
        let repository = Arc::new(FileSaveRepository::new(&config.save_dir)?);
        tracing::info!(save_dir = %config.save_dir.display(), "save slot ready");

        let controller = GameController::builder()
            .config(config.runtime)
            .presentation(presentation.clone())
            .repository(repository)
            .build()?;
        let combat_rx = controller.subscribe(Topic::Combat);

        Ok(Self {
            controller,
            presentation,
            input: InputHandler::new(board),
            consumer: CliEventConsumer::new(),
            combat_rx,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        tracing::info!("CLI client starting...");
        self.controller.start();
        self.presentation.push_message(
            "Click one of your units, then a cell to move or an enemy to strike.",
            MessageLevel::Notice,
        );
        self.refresh()?;

        loop {
            time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
            if !term_event::poll(Duration::from_millis(0))? {
                continue;
            }

            let event = term_event::read()?;
            let commands = self.input.handle(event, self.presentation.board_area());
            for command in commands {
                match command {
                    Command::Quit => {
                        tracing::info!("quitting");
                        return Ok(());
                    }
                    Command::Dispatch(input) => {
                        if let Err(error) = self.controller.dispatch(input).await {
                            tracing::error!(%error, ?input, "input failed");
                            self.presentation
                                .push_message(error.to_string(), MessageLevel::Error);
                        }
                    }
                    Command::Redraw => {}
                }
            }

            self.drain_events();
            self.refresh()?;
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.combat_rx.try_recv() {
                Ok(event) => {
                    if let Some((text, level)) = self.consumer.on_event(&event) {
                        self.presentation.push_message(text, level);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} stale events", skipped);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    fn refresh(&self) -> Result<()> {
        let state = self.controller.state();
        self.presentation.set_status(Status {
            stage: state.stage,
            score: state.score,
            turn: state.turn_owner,
            blocked: state.blocked,
        });
        self.presentation.render()
    }
}
