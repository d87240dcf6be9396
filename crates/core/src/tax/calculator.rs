//! Single-regime tax calculator.
//!
//! A pure, deterministic transformation from (gross income, regime rules,
//! deduction limits, claimed deductions) to a full [`TaxCalculationResult`].
//! Referentially transparent: identical inputs produce identical outputs.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::TaxError;
use super::types::{DeductionLimits, RegimeRules, SlabTax, TaxCalculationResult, TaxSlab};

/// Surcharge bands on taxable income, highest threshold first.
/// The rate applies to tax after rebate, not to income.
const SURCHARGE_BANDS: [(i64, i64); 4] = [
    (50_000_000, 37),
    (20_000_000, 25),
    (10_000_000, 15),
    (5_000_000, 10),
];

/// Health and education cess, percent of (tax after rebate + surcharge).
const CESS_RATE: i64 = 4;

/// Progressive tax calculation over resolved regime rules.
pub struct TaxCalculator;

impl TaxCalculator {
    /// Runs the full pipeline for one regime.
    ///
    /// Monetary amounts are rounded half-away-from-zero to whole currency
    /// units at each stage (per slab, surcharge, cess). The per-stage
    /// rounding is load-bearing: saved historical calculations were produced
    /// this way and recomputation must match them to the last unit.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::NegativeIncome` for negative gross income; total
    /// over all other valid input.
    pub fn calculate(
        rules: &RegimeRules,
        limits: &DeductionLimits,
        gross_income: Decimal,
        claimed_deductions: &BTreeMap<String, Decimal>,
    ) -> Result<TaxCalculationResult, TaxError> {
        if gross_income < Decimal::ZERO {
            return Err(TaxError::NegativeIncome);
        }

        let regime = &rules.regime;

        let income_after_std = (gross_income - regime.standard_deduction).max(Decimal::ZERO);

        let (total_deductions, deductions_breakdown) = if regime.allows_deductions {
            Self::apply_deductions(limits, claimed_deductions)
        } else {
            // Deductions against a disallowing regime are ignored, not rejected.
            (Decimal::ZERO, BTreeMap::new())
        };

        let taxable_income = (income_after_std - total_deductions).max(Decimal::ZERO);

        let (slab_breakdown, tax_before_rebate) = Self::walk_slabs(&rules.slabs, taxable_income);

        let rebate_87a = if taxable_income <= regime.rebate_limit && tax_before_rebate > Decimal::ZERO
        {
            tax_before_rebate.min(regime.rebate_max)
        } else {
            Decimal::ZERO
        };
        let tax_after_rebate = (tax_before_rebate - rebate_87a).max(Decimal::ZERO);

        let surcharge = Self::round_currency(
            tax_after_rebate * Self::surcharge_rate(taxable_income) / Decimal::ONE_HUNDRED,
        );

        let cess = Self::round_currency(
            (tax_after_rebate + surcharge) * Decimal::from(CESS_RATE) / Decimal::ONE_HUNDRED,
        );

        let total_tax = tax_after_rebate + surcharge + cess;

        let effective_rate = if gross_income.is_zero() {
            Decimal::ZERO
        } else {
            Self::round_percent(total_tax / gross_income * Decimal::ONE_HUNDRED)
        };

        Ok(TaxCalculationResult {
            financial_year: rules.financial_year.code.clone(),
            regime: regime.code,
            gross_income,
            standard_deduction: regime.standard_deduction,
            total_deductions,
            deductions_breakdown,
            taxable_income,
            slab_breakdown,
            tax_before_rebate,
            rebate_87a,
            tax_after_rebate,
            surcharge,
            cess,
            total_tax,
            effective_rate,
        })
    }

    /// Caps each claimed deduction at its section limit and totals the
    /// applied amounts. Non-positive claims are skipped; sections without a
    /// configured limit are applied uncapped.
    fn apply_deductions(
        limits: &DeductionLimits,
        claimed: &BTreeMap<String, Decimal>,
    ) -> (Decimal, BTreeMap<String, Decimal>) {
        let mut applied = BTreeMap::new();
        let mut total = Decimal::ZERO;

        for (section, claimed_amount) in claimed {
            if *claimed_amount <= Decimal::ZERO {
                continue;
            }

            let applied_amount = match limits.get(section) {
                Some(Some(limit)) => (*claimed_amount).min(*limit),
                _ => *claimed_amount,
            };

            total += applied_amount;
            applied.insert(section.clone(), applied_amount);
        }

        (total, applied)
    }

    /// Consumes taxable income through the ordered slab table.
    ///
    /// Every slab appears in the output, untouched slabs with zero amounts,
    /// so callers can render the full bracket table.
    fn walk_slabs(slabs: &[TaxSlab], taxable_income: Decimal) -> (Vec<SlabTax>, Decimal) {
        let mut breakdown = Vec::with_capacity(slabs.len());
        let mut remaining = taxable_income;
        let mut tax_before_rebate = Decimal::ZERO;

        for slab in slabs {
            if remaining <= Decimal::ZERO {
                breakdown.push(SlabTax {
                    slab_order: slab.slab_order,
                    min_amount: slab.min_amount,
                    max_amount: slab.max_amount,
                    rate_percentage: slab.rate_percentage,
                    taxable_in_slab: Decimal::ZERO,
                    tax_in_slab: Decimal::ZERO,
                });
                continue;
            }

            let width = slab
                .max_amount
                .map_or(remaining, |max| max - slab.min_amount);
            let taxable_in_slab = remaining.min(width);
            let tax_in_slab =
                Self::round_currency(taxable_in_slab * slab.rate_percentage / Decimal::ONE_HUNDRED);

            tax_before_rebate += tax_in_slab;
            remaining -= taxable_in_slab;

            breakdown.push(SlabTax {
                slab_order: slab.slab_order,
                min_amount: slab.min_amount,
                max_amount: slab.max_amount,
                rate_percentage: slab.rate_percentage,
                taxable_in_slab,
                tax_in_slab,
            });
        }

        (breakdown, tax_before_rebate)
    }

    /// Surcharge rate for a taxable income: the highest band whose threshold
    /// the income exceeds. Exactly one band applies.
    fn surcharge_rate(taxable_income: Decimal) -> Decimal {
        for (threshold, rate) in SURCHARGE_BANDS {
            if taxable_income > Decimal::from(threshold) {
                return Decimal::from(rate);
            }
        }
        Decimal::ZERO
    }

    /// Rounds to whole currency units, half away from zero.
    pub(crate) fn round_currency(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Rounds a percentage to 2 decimal places, half away from zero.
    pub(crate) fn round_percent(rate: Decimal) -> Decimal {
        rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
