//! Tax engine error types.

use thiserror::Error;

use super::types::RegimeCode;

/// Errors produced by rule resolution and tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// Gross income below zero is rejected before any computation.
    #[error("Gross income cannot be negative")]
    NegativeIncome,

    /// Financial year is unknown or not active.
    #[error("Financial year not found or inactive: {0}")]
    YearNotFound(String),

    /// The year exists but has no configuration for the requested regime.
    #[error("Regime '{regime}' is not configured for financial year {year}")]
    RegimeNotFound {
        /// Financial year code.
        year: String,
        /// Requested regime.
        regime: RegimeCode,
    },

    /// The regime resolved but carries no slabs. A configuration integrity
    /// fault, surfaced as a server-side error rather than a caller mistake.
    #[error("No tax slabs configured for regime '{regime}' of financial year {year}")]
    MissingSlabs {
        /// Financial year code.
        year: String,
        /// Resolved regime.
        regime: RegimeCode,
    },

    /// A rule row exists but cannot be interpreted (e.g. an unknown regime
    /// code in the store). A configuration integrity fault.
    #[error("Malformed rule configuration: {0}")]
    Configuration(String),

    /// The backing rule store failed.
    #[error("Rule storage error: {0}")]
    Storage(String),
}

impl TaxError {
    /// True for faults the caller cannot fix by changing input.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingSlabs { .. } | Self::Configuration(_) | Self::Storage(_)
        )
    }
}
