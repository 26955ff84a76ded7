// src/error.rs

//! Error types for the configuration surface of the heading pilot.
//!
//! The control step itself never fails. These errors only arise when a
//! host resolves properties or modes by name.

/// Errors from name-based lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PilotError {
    /// No gain or property is registered under this name.
    UnknownProperty,
    /// The steering mode name is not recognised.
    UnknownMode,
}

impl core::fmt::Display for PilotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PilotError::UnknownProperty => write!(f, "unknown pilot property"),
            PilotError::UnknownMode => write!(f, "unknown steering mode"),
        }
    }
}

impl core::error::Error for PilotError {}
