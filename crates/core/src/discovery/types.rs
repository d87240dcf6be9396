//! Discovery input records and suggestion types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Insurance policy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Health cover; premiums map to section 80D.
    Health,
    /// Life cover; premiums map to section 80C.
    Life,
    /// Vehicle cover; no deduction section.
    Vehicle,
    /// Anything else; no deduction section.
    Other,
}

impl PolicyKind {
    /// Returns the stored code for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Life => "life",
            Self::Vehicle => "vehicle",
            Self::Other => "other",
        }
    }

    /// Parses a stored code; unknown codes fall back to `Other`.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "health" => Self::Health,
            "life" => Self::Life,
            "vehicle" => Self::Vehicle,
            _ => Self::Other,
        }
    }
}

/// A user's insurance policy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Record ID.
    pub id: Uuid,
    /// Policy display name.
    pub name: String,
    /// Policy classification.
    pub kind: PolicyKind,
    /// Annual premium paid.
    pub annual_premium: Decimal,
}

/// Loan classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    /// Home loan; interest maps to section 24B.
    Home,
    /// Education loan; interest maps to section 80E.
    Education,
    /// Personal loan; no deduction section.
    Personal,
    /// Vehicle loan; no deduction section.
    Vehicle,
    /// Anything else; no deduction section.
    Other,
}

impl LoanKind {
    /// Returns the stored code for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Education => "education",
            Self::Personal => "personal",
            Self::Vehicle => "vehicle",
            Self::Other => "other",
        }
    }

    /// Parses a stored code; unknown codes fall back to `Other`.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "home" => Self::Home,
            "education" => Self::Education,
            "personal" => Self::Personal,
            "vehicle" => Self::Vehicle,
            _ => Self::Other,
        }
    }
}

/// A user's loan account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAccount {
    /// Record ID.
    pub id: Uuid,
    /// Loan display name.
    pub name: String,
    /// Loan classification.
    pub kind: LoanKind,
    /// Interest paid over the financial year.
    pub annual_interest_paid: Decimal,
}

/// One suggested deduction entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSuggestion {
    /// Deduction section code (e.g. "80D").
    pub section_code: String,
    /// Suggested claim amount, already capped at the section limit.
    pub suggested_amount: Decimal,
    /// Heuristic confidence, 0 to 1.
    pub confidence: Decimal,
    /// Coarse estimated annual tax saving at the user's marginal bracket.
    pub estimated_saving: Decimal,
    /// Which record the suggestion came from.
    pub source: String,
}
