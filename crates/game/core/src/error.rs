//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in battle-core.
//! Domain-specific errors (e.g., `MoveError`, `SpawnError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Deterministic**: No error carries host-specific data (paths, timestamps)

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The caller may retry with a different input (re-prompt the player)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative choice.
    ///
    /// Examples: target not eligible for the skill, no free spawn slot
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown skill name, skill missing from skillset
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: stored intent references an entity that is not in the roster
    Internal,

    /// Fatal error - battle cannot continue.
    ///
    /// Examples: a faction has no combatants, arena has no slots for a faction
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

/// Common trait for all battle-core errors.
///
/// This trait provides a uniform interface for error classification across all
/// error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log filtering, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
