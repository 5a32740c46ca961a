//! Runtime orchestration for a skirmish session.
//!
//! This crate wires the rules engine to the outside world: the turn state
//! machine, the opponent policy, save slots, and the presentation gateway.
//! Front-ends build a [`GameController`] through [`RuntimeBuilder`] and feed it
//! [`InputEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the turn state machine and input handlers
//! - [`runtime`] holds configuration and the builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for observers
//! - [`providers`] contains the built-in opponent policy
//! - [`repository`] persists the single save slot
pub mod api;
pub mod controller;
pub mod events;
pub mod providers;
pub mod repository;
pub mod runtime;

pub use api::{
    ActionProvider, CursorKind, Highlight, HoverFeedback, InputEvent, NullPresentation,
    PassActionProvider, PresentationGateway, Result, RuntimeError, Theme, hover_feedback, tooltip,
};
pub use controller::GameController;
pub use events::{CombatEvent, Event, EventBus, ProgressionEvent, SessionEvent, Topic};
pub use providers::LowestHealthAiProvider;
pub use repository::{
    FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveRepository,
};
pub use runtime::{RuntimeBuilder, RuntimeConfig};
