//! Tax rule and calculation result types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A published financial year (e.g. "FY2025_26").
///
/// Immutable once published; resolved by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Unique year code.
    pub code: String,
    /// Human-readable name (e.g. "FY 2025-26").
    pub display_name: String,
    /// Whether calculations may be run against this year.
    pub is_active: bool,
}

/// Tax regime selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegimeCode {
    /// Old regime: deductions allowed, legacy slab table.
    Old,
    /// New regime: restricted deductions, different slabs.
    New,
}

impl RegimeCode {
    /// Returns the wire code for this regime.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Parses a wire code into a regime.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regime configuration for one financial year.
///
/// Exactly one regime exists per (financial year, code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regime {
    /// Regime code.
    pub code: RegimeCode,
    /// Human-readable name.
    pub display_name: String,
    /// Fixed amount subtracted from gross income before anything else.
    pub standard_deduction: Decimal,
    /// Taxable-income threshold at or below which the rebate applies.
    pub rebate_limit: Decimal,
    /// Maximum rebate amount.
    pub rebate_max: Decimal,
    /// Whether section deductions are honored under this regime.
    pub allows_deductions: bool,
}

/// One progressive bracket within a regime.
///
/// Slabs are contiguous and non-overlapping when sorted by `slab_order`;
/// the last slab has `max_amount = None` (unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Evaluation order, ascending.
    pub slab_order: i32,
    /// Inclusive lower bound.
    pub min_amount: Decimal,
    /// Exclusive upper bound; `None` for the unbounded last slab.
    pub max_amount: Option<Decimal>,
    /// Marginal rate in percent.
    pub rate_percentage: Decimal,
}

/// A resolved regime plus its ordered slab table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    /// The financial year the regime belongs to.
    pub financial_year: FinancialYear,
    /// The regime configuration.
    pub regime: Regime,
    /// Slabs sorted by `slab_order`.
    pub slabs: Vec<TaxSlab>,
}

/// Per-year deduction caps: section code -> optional maximum claimable amount.
///
/// `None` means the section is uncapped. A `BTreeMap` keeps output ordering
/// deterministic across runs.
pub type DeductionLimits = BTreeMap<String, Option<Decimal>>;

/// Tax attributable to a single slab of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTax {
    /// Evaluation order of the slab.
    pub slab_order: i32,
    /// Inclusive lower bound.
    pub min_amount: Decimal,
    /// Exclusive upper bound; `None` for the unbounded last slab.
    pub max_amount: Option<Decimal>,
    /// Marginal rate in percent.
    pub rate_percentage: Decimal,
    /// Income taxed within this slab (zero for untouched slabs).
    pub taxable_in_slab: Decimal,
    /// Tax for this slab, rounded to whole currency units.
    pub tax_in_slab: Decimal,
}

/// Full auditable breakdown of one single-regime calculation.
///
/// A value object: computed, optionally written once to the history table,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// Financial year code the calculation ran against.
    pub financial_year: String,
    /// Regime the calculation ran against.
    pub regime: RegimeCode,
    /// Gross income as supplied by the caller.
    pub gross_income: Decimal,
    /// Standard deduction applied.
    pub standard_deduction: Decimal,
    /// Sum of applied (capped) section deductions.
    pub total_deductions: Decimal,
    /// Applied amount per section, after capping.
    pub deductions_breakdown: BTreeMap<String, Decimal>,
    /// Income remaining after standard and section deductions.
    pub taxable_income: Decimal,
    /// Every slab of the regime, in order, untouched slabs included.
    pub slab_breakdown: Vec<SlabTax>,
    /// Sum of per-slab tax before the rebate.
    pub tax_before_rebate: Decimal,
    /// Rebate applied (Section 87A analogue).
    pub rebate_87a: Decimal,
    /// Tax remaining after the rebate.
    pub tax_after_rebate: Decimal,
    /// Surcharge on tax for high taxable incomes.
    pub surcharge: Decimal,
    /// Health and education cess on (tax + surcharge).
    pub cess: Decimal,
    /// Final tax payable.
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross income, 2 decimal places.
    pub effective_rate: Decimal,
}

/// Result of running both regimes over identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Financial year code.
    pub financial_year: String,
    /// Gross income both calculations ran with.
    pub gross_income: Decimal,
    /// Full old-regime breakdown.
    pub old_regime: TaxCalculationResult,
    /// Full new-regime breakdown.
    pub new_regime: TaxCalculationResult,
    /// Regime with the lower total tax ("old" on ties).
    pub recommended_regime: RegimeCode,
    /// Absolute difference in total tax.
    pub savings_amount: Decimal,
    /// Savings as a percentage of gross income, 2 decimal places.
    pub savings_percentage: Decimal,
}
