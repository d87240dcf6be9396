//! Old-vs-new regime comparison.

use rust_decimal::Decimal;

use super::calculator::TaxCalculator;
use super::types::{ComparisonResult, RegimeCode, TaxCalculationResult};

/// Diffs two single-regime breakdowns into a recommendation.
pub struct RegimeComparator;

impl RegimeComparator {
    /// Builds a comparison from breakdowns computed over identical inputs.
    ///
    /// Recommends the new regime only when it is strictly cheaper; ties keep
    /// the old regime. The recommendation considers nothing but total tax.
    #[must_use]
    pub fn compare(
        old_regime: TaxCalculationResult,
        new_regime: TaxCalculationResult,
    ) -> ComparisonResult {
        let gross_income = old_regime.gross_income;
        let savings = old_regime.total_tax - new_regime.total_tax;

        let recommended_regime = if savings > Decimal::ZERO {
            RegimeCode::New
        } else {
            RegimeCode::Old
        };

        let savings_amount = savings.abs();
        let savings_percentage = if gross_income.is_zero() {
            Decimal::ZERO
        } else {
            TaxCalculator::round_percent(savings_amount / gross_income * Decimal::ONE_HUNDRED)
        };

        ComparisonResult {
            financial_year: old_regime.financial_year.clone(),
            gross_income,
            old_regime,
            new_regime,
            recommended_regime,
            savings_amount,
            savings_percentage,
        }
    }
}
