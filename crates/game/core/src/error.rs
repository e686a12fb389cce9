//! Common error infrastructure for progression-core.
//!
//! Domain-specific errors (e.g., `LearnError`, `AdvanceJobError`) are defined in
//! their respective modules alongside the operations they validate. Every
//! operation validates before it mutates, so an `Err` always means the
//! character is exactly as it was before the call.

/// Severity of a rejection.
///
/// - **Validation**: malformed or out-of-range input (unknown id, zero amount)
/// - **Policy**: a legitimate request denied by the rules (not enough points,
///   on cooldown, prerequisite unmet, anti-boost gap)
/// - **Integrity**: a reference that should have been resolvable is missing;
///   the configuration is partially broken and the feature silently degrades
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Policy,
    Integrity,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Policy => "policy",
            Self::Integrity => "integrity",
        }
    }

    /// Integrity faults point at broken content and deserve an error log.
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity)
    }
}

/// Common trait for all progression errors.
///
/// `Display` is the human-readable reason surfaced to the player through the
/// feedback hook; `error_code` is a stable identifier for logs and tests.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
