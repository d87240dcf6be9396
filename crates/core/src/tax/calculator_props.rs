//! Property-based tests for the single-regime calculator.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::TaxCalculator;
use super::presets::fy2025_26;
use super::types::{DeductionLimits, RegimeCode, RegimeRules};

/// Resolves a preset regime into the calculator's input shape.
fn preset_rules(code: RegimeCode) -> (RegimeRules, DeductionLimits) {
    let year = fy2025_26();
    let (regime, slabs) = year
        .regimes
        .iter()
        .find(|(r, _)| r.code == code)
        .cloned()
        .unwrap();

    (
        RegimeRules {
            financial_year: year.year,
            regime,
            slabs,
        },
        year.deduction_limits,
    )
}

/// Strategy for gross income in whole currency units.
fn gross_income() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(Decimal::from)
}

/// Strategy for a claimed-deductions map over known and unknown sections.
fn claimed_deductions() -> impl Strategy<Value = BTreeMap<String, Decimal>> {
    prop::collection::btree_map(
        prop_oneof![
            Just("80C".to_string()),
            Just("80D".to_string()),
            Just("80E".to_string()),
            Just("24B".to_string()),
            Just("80TTA".to_string()),
            Just("80XYZ".to_string()),
        ],
        (0i64..1_000_000i64).prop_map(Decimal::from),
        0..5,
    )
}

fn regime_strategy() -> impl Strategy<Value = RegimeCode> {
    prop_oneof![Just(RegimeCode::Old), Just(RegimeCode::New)]
}

proptest! {
    /// Sum of per-slab taxable amounts reconstructs taxable income exactly.
    #[test]
    fn test_slab_coverage(
        gross in gross_income(),
        claimed in claimed_deductions(),
        regime in regime_strategy(),
    ) {
        let (rules, limits) = preset_rules(regime);
        let result = TaxCalculator::calculate(&rules, &limits, gross, &claimed).unwrap();

        let covered: Decimal = result
            .slab_breakdown
            .iter()
            .map(|s| s.taxable_in_slab)
            .sum();
        prop_assert_eq!(covered, result.taxable_income);
    }

    /// Every slab of the regime appears in the breakdown, touched or not.
    #[test]
    fn test_breakdown_enumerates_all_slabs(
        gross in gross_income(),
        regime in regime_strategy(),
    ) {
        let (rules, limits) = preset_rules(regime);
        let result =
            TaxCalculator::calculate(&rules, &limits, gross, &BTreeMap::new()).unwrap();

        prop_assert_eq!(result.slab_breakdown.len(), rules.slabs.len());
    }

    /// Total tax never decreases as gross income grows.
    #[test]
    fn test_total_tax_monotonic_in_income(
        lower in 0i64..50_000_000,
        delta in 0i64..50_000_000,
        regime in regime_strategy(),
    ) {
        let (rules, limits) = preset_rules(regime);
        let claimed = BTreeMap::new();

        let at_lower =
            TaxCalculator::calculate(&rules, &limits, Decimal::from(lower), &claimed).unwrap();
        let at_higher =
            TaxCalculator::calculate(&rules, &limits, Decimal::from(lower + delta), &claimed)
                .unwrap();

        prop_assert!(at_higher.total_tax >= at_lower.total_tax);
    }

    /// Identical inputs produce identical output, no hidden state.
    #[test]
    fn test_idempotent(
        gross in gross_income(),
        claimed in claimed_deductions(),
        regime in regime_strategy(),
    ) {
        let (rules, limits) = preset_rules(regime);

        let first = TaxCalculator::calculate(&rules, &limits, gross, &claimed).unwrap();
        let second = TaxCalculator::calculate(&rules, &limits, gross, &claimed).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Applied deductions never exceed the section cap or the claimed amount.
    #[test]
    fn test_applied_deductions_respect_caps(
        gross in gross_income(),
        claimed in claimed_deductions(),
    ) {
        let (rules, limits) = preset_rules(RegimeCode::Old);
        let result = TaxCalculator::calculate(&rules, &limits, gross, &claimed).unwrap();

        for (section, applied) in &result.deductions_breakdown {
            prop_assert!(*applied <= claimed[section]);
            if let Some(Some(limit)) = limits.get(section) {
                prop_assert!(applied <= limit);
            }
        }
    }

    /// All monetary outputs stay non-negative and the effective rate is zero
    /// exactly when gross income is zero.
    #[test]
    fn test_outputs_non_negative(
        gross in gross_income(),
        claimed in claimed_deductions(),
        regime in regime_strategy(),
    ) {
        let (rules, limits) = preset_rules(regime);
        let result = TaxCalculator::calculate(&rules, &limits, gross, &claimed).unwrap();

        prop_assert!(result.taxable_income >= Decimal::ZERO);
        prop_assert!(result.tax_before_rebate >= Decimal::ZERO);
        prop_assert!(result.tax_after_rebate >= Decimal::ZERO);
        prop_assert!(result.surcharge >= Decimal::ZERO);
        prop_assert!(result.cess >= Decimal::ZERO);
        prop_assert!(result.total_tax >= Decimal::ZERO);
        prop_assert!(result.effective_rate >= Decimal::ZERO);

        if gross.is_zero() {
            prop_assert_eq!(result.effective_rate, Decimal::ZERO);
        }
    }
}
