//! Terminal presentation components used by the CLI client.
pub mod event_consumer;
pub mod gateway;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use event_consumer::CliEventConsumer;
pub use gateway::TerminalPresentation;
pub use screen::{MessageLevel, Screen, Status};
