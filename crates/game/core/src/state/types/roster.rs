use super::common::UnitId;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    #[error("unit {0} is already in the roster")]
    DuplicateMember(UnitId),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::DuplicateMember(_) => "ROSTER_DUPLICATE_MEMBER",
        }
    }
}

/// One side's membership list. A unit appears at most once.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Roster {
    members: Vec<UnitId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, unit: UnitId) -> Result<(), RosterError> {
        if self.contains(unit) {
            return Err(RosterError::DuplicateMember(unit));
        }
        self.members.push(unit);
        Ok(())
    }

    /// Adds every unit in order, stopping at the first duplicate. Units added
    /// before the duplicate stay in the roster.
    pub fn add_all(&mut self, units: impl IntoIterator<Item = UnitId>) -> Result<(), RosterError> {
        units.into_iter().try_for_each(|unit| self.add(unit))
    }

    /// Removes `unit`. Returns false if it was not a member.
    pub fn delete(&mut self, unit: UnitId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| *member != unit);
        self.members.len() != before
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.members.contains(&unit)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Copies the current members out. Callers must not rely on the order.
    pub fn to_vec(&self) -> Vec<UnitId> {
        self.members.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.members.iter().copied()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = UnitId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, UnitId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}
