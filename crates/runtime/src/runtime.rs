//! Runtime configuration and the controller builder.
//!
//! [`RuntimeBuilder`] assembles a [`GameController`] from a configuration and
//! optional collaborators. Anything left unset falls back to a headless
//! default, which is what tests rely on.

use std::env;
use std::sync::Arc;

use game_core::{Board, GameConfig, GameState, RandomSource, SeededRandom, new_game};

use crate::api::{ActionProvider, NullPresentation, PresentationGateway, Result};
use crate::controller::GameController;
use crate::events::EventBus;
use crate::providers::LowestHealthAiProvider;
use crate::repository::{InMemorySaveRepo, SaveRepository};

/// Runtime configuration shared by the controller and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed for every random choice. Drawn fresh when absent.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: None,
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_BOARD_SIZE` - Board side length (default: 8, minimum: 4)
    /// - `SKIRMISH_SEED` - Fixed seed for reproducible games (default: random)
    /// - `SKIRMISH_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<u32>("SKIRMISH_BOARD_SIZE") {
            config.game_config.board_size = size.max(GameConfig::MIN_BOARD_SIZE);
        }

        config.seed = read_env::<u64>("SKIRMISH_SEED");

        if let Some(capacity) = read_env::<usize>("SKIRMISH_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }

    /// The configured seed, or a fresh one from the thread RNG.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Builder for [`GameController`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    presentation: Option<Arc<dyn PresentationGateway>>,
    repository: Option<Arc<dyn SaveRepository>>,
    opponent: Option<Box<dyn ActionProvider>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl RuntimeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            presentation: None,
            repository: None,
            opponent: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing state instead of a freshly generated game
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn presentation(mut self, presentation: Arc<dyn PresentationGateway>) -> Self {
        self.presentation = Some(presentation);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Replace the built-in opponent policy
    pub fn opponent(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.opponent = Some(Box::new(provider));
        self
    }

    /// Replace the seeded random source, e.g. with a scripted one in tests
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn build(self) -> Result<GameController> {
        let board = Board::from_config(&self.config.game_config);
        let mut rng: Box<dyn RandomSource> = match self.rng {
            Some(rng) => rng,
            None => {
                let seed = self.config.resolve_seed();
                tracing::info!(seed, "seeding random source");
                Box::new(SeededRandom::new(seed))
            }
        };

        let state = match self.state {
            Some(state) => state,
            None => new_game(&board, rng.as_mut())?,
        };

        Ok(GameController::from_parts(
            board,
            state,
            rng,
            self.presentation
                .unwrap_or_else(|| Arc::new(NullPresentation)),
            self.repository
                .unwrap_or_else(|| Arc::new(InMemorySaveRepo::new())),
            self.opponent
                .unwrap_or_else(|| Box::new(LowestHealthAiProvider::new())),
            EventBus::with_capacity(self.config.event_buffer_size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_an_eight_by_eight_board() {
        let config = RuntimeConfig::default();
        assert_eq!(config.game_config.board_size, 8);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn fixed_seed_is_used_verbatim() {
        let config = RuntimeConfig {
            seed: Some(42),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.resolve_seed(), 42);
    }
}
