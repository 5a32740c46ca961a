//! Turns combat events into message log lines.
use runtime::{CombatEvent, Event};

use super::screen::MessageLevel;

/// Describes runtime events for the message log.
///
/// Stage changes and save/load already reach the player through
/// `show_message`, so only combat events are narrated here.
#[derive(Debug, Default)]
pub struct CliEventConsumer;

impl CliEventConsumer {
    pub fn new() -> Self {
        Self
    }

    pub fn on_event(&self, event: &Event) -> Option<(String, MessageLevel)> {
        let Event::Combat(combat) = event else {
            return None;
        };

        let text = match combat {
            CombatEvent::UnitMoved { side, from, to } => {
                format!("{side} unit moves {from} -> {to}")
            }
            CombatEvent::UnitAttacked {
                attacker,
                target,
                damage,
                remaining_health,
            } => format!(
                "{attacker} hits {target} for {damage} damage ({remaining_health} left)"
            ),
            CombatEvent::UnitDefeated { kind, side, cell } => {
                format!("{side} {kind} falls at {cell}")
            }
        };
        Some((text, MessageLevel::Info))
    }
}
