//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`MoveError`, `AttackError`, `RosterError`, ...) live
//! next to the code that raises them. This module holds the shared severity
//! classification and the [`GameError`] trait they all implement.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request was rejected, the game continues unchanged
/// - **Validation**: invalid input that should not be retried as-is
/// - **Internal**: unexpected state inconsistency (a bug)
/// - **Fatal**: game state cannot be trusted any more
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination occupied, target out of range, duplicate roster member.
    Recoverable,

    /// Examples: unit level outside 1..=4, unknown persisted unit type.
    Validation,

    /// Examples: a positioned unit that belongs to no roster.
    Internal,

    /// Examples: state invariant violated beyond repair.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable upper-snake-case code from `error_code`
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
