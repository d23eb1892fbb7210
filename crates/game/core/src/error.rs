//! Common error infrastructure for arena-core.
//!
//! Domain errors live next to the code that raises them (`StatsError` in
//! [`crate::stats`]); this module only provides the shared classification used
//! by every crate in the workspace to decide how a failure should be handled.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Benign conditions a periodic driver can ignore and retry later
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Storage or invariant failures that abort the current action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same call may succeed once state moves on.
    ///
    /// Examples: advancing a match whose lineups are still incomplete
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: lineup with two identical names, fighter already used
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: match row referencing a guild that no longer exists
    Internal,

    /// Fatal error - storage failed, the action was rolled back.
    ///
    /// Examples: poisoned lock, failed transaction commit
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

/// Common trait for all arena errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
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
