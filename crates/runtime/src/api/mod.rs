//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors, input events, the presentation gateway, and action providers.

pub mod errors;
pub mod input;
pub mod presentation;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use input::InputEvent;
pub use presentation::{
    CursorKind, Highlight, HoverFeedback, NullPresentation, PresentationGateway, Theme,
    hover_feedback, tooltip,
};
pub use providers::{ActionProvider, PassActionProvider};
