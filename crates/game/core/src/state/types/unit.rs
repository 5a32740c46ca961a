//! Unit kinds, their fixed profiles, and the leveling rule.

use super::common::{Side, UnitId};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// The six unit kinds. Every unit is built from one of these tags and its
/// [`UnitProfile`]; there is no generic kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitKind {
    Swordsman,
    Bowman,
    Magician,
    Daemon,
    Undead,
    Vampire,
}

impl UnitKind {
    /// Kinds the home roster is generated from.
    pub const HOME: [UnitKind; 3] = [UnitKind::Bowman, UnitKind::Swordsman, UnitKind::Magician];
    /// Kinds the opponent roster is generated from.
    pub const OPPONENT: [UnitKind; 3] = [UnitKind::Vampire, UnitKind::Undead, UnitKind::Daemon];

    /// Base stats and ranges. Fixed at construction, independent of level.
    pub const fn profile(self) -> UnitProfile {
        match self {
            UnitKind::Swordsman | UnitKind::Undead => UnitProfile::new(40, 10, 4, 1),
            UnitKind::Bowman | UnitKind::Vampire => UnitProfile::new(25, 25, 2, 2),
            UnitKind::Magician => UnitProfile::new(10, 40, 1, 4),
            UnitKind::Daemon => UnitProfile::new(10, 10, 1, 4),
        }
    }

    /// The side whose kind set contains this kind.
    pub const fn side(self) -> Side {
        match self {
            UnitKind::Swordsman | UnitKind::Bowman | UnitKind::Magician => Side::Home,
            UnitKind::Daemon | UnitKind::Undead | UnitKind::Vampire => Side::Opponent,
        }
    }

    /// Kinds a roster for `side` is drawn from.
    pub const fn allowed_for(side: Side) -> &'static [UnitKind] {
        match side {
            Side::Home => &Self::HOME,
            Side::Opponent => &Self::OPPONENT,
        }
    }
}

/// Per-kind constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitProfile {
    pub attack: u32,
    pub defence: u32,
    pub move_range: u32,
    pub attack_range: u32,
}

impl UnitProfile {
    pub const fn new(attack: u32, defence: u32, move_range: u32, attack_range: u32) -> Self {
        Self {
            attack,
            defence,
            move_range,
            attack_range,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructionError {
    #[error("unit level {level} is outside 1..={max}", max = GameConfig::MAX_LEVEL)]
    LevelOutOfRange { level: u8 },
}

impl GameError for ConstructionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConstructionError::LevelOutOfRange { .. } => "UNIT_LEVEL_OUT_OF_RANGE",
        }
    }
}

/// A combat-capable unit.
///
/// `kind` fixes the base stats and ranges. `level`, `attack`, `defence` grow
/// only through [`Unit::level_up`]; `health` is lowered by combat and raised
/// by leveling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub level: u8,
    pub attack: u32,
    pub defence: u32,
    pub health: u32,
}

impl Unit {
    /// Builds a unit of `kind` at `level`, applying `level - 1` level-ups to
    /// the level-1 profile.
    pub fn new(id: UnitId, kind: UnitKind, level: u8) -> Result<Self, ConstructionError> {
        if level == 0 || level > GameConfig::MAX_LEVEL {
            return Err(ConstructionError::LevelOutOfRange { level });
        }

        let profile = kind.profile();
        let mut unit = Self {
            id,
            kind,
            level: 1,
            attack: profile.attack,
            defence: profile.defence,
            health: GameConfig::HEALTH_CAP,
        };
        for _ in 1..level {
            unit.level_up();
        }
        Ok(unit)
    }

    pub fn side(&self) -> Side {
        self.kind.side()
    }

    pub fn move_range(&self) -> u32 {
        self.kind.profile().move_range
    }

    pub fn attack_range(&self) -> u32 {
        self.kind.profile().attack_range
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Raises the level by one.
    ///
    /// Attack and defence scale by `0.8 + health / 100` but never shrink;
    /// health regains 80 and is clamped to the cap. Both stat factors use the
    /// health from before this level-up. The level stops at
    /// [`GameConfig::MAX_LEVEL`]; stats and health still grow past it.
    pub fn level_up(&mut self) {
        let factor = 0.8 + f64::from(self.health) / 100.0;
        self.level = (self.level + 1).min(GameConfig::MAX_LEVEL);
        self.attack = grow(self.attack, factor);
        self.defence = grow(self.defence, factor);
        self.health = (self.health + 80).min(GameConfig::HEALTH_CAP);
    }
}

fn grow(stat: u32, factor: f64) -> u32 {
    round_stat(f64::from(stat).max(f64::from(stat) * factor))
}

/// Rounds a non-negative stat to the nearest integer, halves rounding up.
pub(crate) fn round_stat(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}
