//! Combat resolution.
//!
//! Pure functions over unit stats. The engine computes a [`PendingStrike`]
//! first and commits it later so a front-end can play the damage cue in
//! between.

pub mod damage;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use result::{PendingStrike, StrikeReport};
