//! Error types for the detection core
//!
//! Errors are organized by domain:
//! - [`AccessError`]: the raw register access primitive failed
//! - [`MdioError`]: the MDIO handshake against the controller failed
//!
//! Failures are deliberately kept apart from data: a failed register read
//! never yields a sentinel value, and a failed MDIO transaction never yields
//! a zero reading. Callers see `Err(..)` or a genuine hardware value, never
//! something in between.

// =============================================================================
// Register Access Errors
// =============================================================================

/// Failure of the raw register access primitive.
///
/// The primitive reports success or failure only; no further detail is
/// available at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessError;

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("register access failed")
    }
}

// =============================================================================
// MDIO Transaction Errors
// =============================================================================

/// MDIO transaction failures
///
/// Both timeout variants are soft at the detection level: the orchestrator
/// logs a diagnostic and carries on with the remaining steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MdioError {
    /// Ready bit never set before the command could be issued
    Busy,
    /// Ready bit never set after the command was issued
    Timeout,
    /// Register access primitive failed mid-transaction
    Access(AccessError),
}

impl core::fmt::Display for MdioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MdioError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MdioError::Busy => "mdio busy",
            MdioError::Timeout => "mdio read timeout",
            MdioError::Access(_) => "register access failed",
        }
    }
}

impl From<AccessError> for MdioError {
    fn from(e: AccessError) -> Self {
        MdioError::Access(e)
    }
}

/// Result type alias for register access operations
pub type AccessResult<T> = core::result::Result<T, AccessError>;

/// Result type alias for MDIO transactions
pub type MdioResult<T> = core::result::Result<T, MdioError>;

// =============================================================================
// Unit Tests
// =============================================================================
