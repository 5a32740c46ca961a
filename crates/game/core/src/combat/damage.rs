//! Damage calculation and application.

use crate::state::Unit;
use crate::state::types::unit::round_stat;

/// Fraction of the attack that always lands, however strong the defence.
const MINIMUM_DAMAGE_RATIO: f64 = 0.1;

/// Damage dealt by `attacker` to `defender`.
///
/// # Formula
///
/// ```text
/// damage = round(max(attack - defence, attack * 0.1))
/// ```
///
/// Rounding is half-up, so a level-1 magician (10 attack) always deals at
/// least 1 damage.
pub fn calculate_damage(attacker: &Unit, defender: &Unit) -> u32 {
    let attack = f64::from(attacker.attack);
    let reduced = attack - f64::from(defender.defence);
    round_stat(reduced.max(attack * MINIMUM_DAMAGE_RATIO))
}

/// Health left after taking `damage`, floored at zero.
pub fn apply_damage(current_health: u32, damage: u32) -> u32 {
    current_health.saturating_sub(damage)
}
