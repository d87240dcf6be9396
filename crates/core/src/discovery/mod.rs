//! Advisory deduction discovery.
//!
//! Scans a user's insurance and loan records and suggests deduction entries
//! with a confidence score and a coarse tax-saving estimate. Suggestions are
//! for a human to accept; they are never fed into the calculator directly.

pub mod engine;
pub mod types;

pub use engine::DiscoveryEngine;
pub use types::{
    DeductionSuggestion, InsurancePolicy, LoanAccount, LoanKind, PolicyKind,
};
