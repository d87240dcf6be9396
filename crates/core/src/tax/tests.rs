//! Example-based tests for the tax pipeline.

use std::collections::BTreeMap;

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::TaxError;
use super::presets::{YearRules, fy2025_26};
use super::rules::{InMemoryRuleRepository, RuleRepository};
use super::service::TaxService;
use super::types::{FinancialYear, Regime, RegimeCode, TaxSlab};

fn service() -> TaxService<InMemoryRuleRepository> {
    TaxService::new(InMemoryRuleRepository::with_builtin_years())
}

fn no_deductions() -> BTreeMap<String, Decimal> {
    BTreeMap::new()
}

fn deductions(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(section, amount)| ((*section).to_string(), *amount))
        .collect()
}

// ========================================================================
// Single-regime pipeline
// ========================================================================

#[tokio::test]
async fn test_new_regime_reference_scenario() {
    let result = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(1_200_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.financial_year, "FY2025_26");
    assert_eq!(result.regime, RegimeCode::New);
    assert_eq!(result.standard_deduction, dec!(75_000));
    assert_eq!(result.total_deductions, dec!(0));
    assert_eq!(result.taxable_income, dec!(1_125_000));

    // 0 + 5% of 400k + 10% of 300k + 15% of 125k
    assert_eq!(result.tax_before_rebate, dec!(68_750));
    assert_eq!(result.rebate_87a, dec!(0));
    assert_eq!(result.tax_after_rebate, dec!(68_750));
    assert_eq!(result.surcharge, dec!(0));
    assert_eq!(result.cess, dec!(2_750));
    assert_eq!(result.total_tax, dec!(71_500));
    assert_eq!(result.effective_rate, dec!(5.96));
}

#[tokio::test]
async fn test_slab_breakdown_enumerates_every_slab() {
    let result = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(1_200_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.slab_breakdown.len(), 6);

    let taxed: Vec<Decimal> = result
        .slab_breakdown
        .iter()
        .map(|s| s.taxable_in_slab)
        .collect();
    assert_eq!(
        taxed,
        vec![
            dec!(300_000),
            dec!(400_000),
            dec!(300_000),
            dec!(125_000),
            dec!(0),
            dec!(0)
        ]
    );

    // Untouched slabs still carry their bracket definition.
    let last = &result.slab_breakdown[5];
    assert_eq!(last.min_amount, dec!(1_500_000));
    assert_eq!(last.max_amount, None);
    assert_eq!(last.rate_percentage, dec!(30));
    assert_eq!(last.tax_in_slab, dec!(0));
}

#[tokio::test]
async fn test_zero_income_is_all_zeros() {
    let result = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(0), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(0));
    assert_eq!(result.tax_before_rebate, dec!(0));
    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(result.effective_rate, dec!(0));
    assert!(result.slab_breakdown.iter().all(|s| s.tax_in_slab.is_zero()));
}

#[tokio::test]
async fn test_negative_income_rejected() {
    let err = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(-1), &no_deductions())
        .await
        .unwrap_err();

    assert_eq!(err, TaxError::NegativeIncome);
}

// ========================================================================
// Rebate boundary
// ========================================================================

#[tokio::test]
async fn test_rebate_wipes_tax_at_limit() {
    // Gross 775,000 less the 75,000 standard deduction lands taxable income
    // exactly on the 700,000 rebate limit.
    let result = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(775_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(700_000));
    assert_eq!(result.tax_before_rebate, dec!(20_000));
    assert_eq!(result.rebate_87a, dec!(20_000));
    assert_eq!(result.tax_after_rebate, dec!(0));
    assert_eq!(result.total_tax, dec!(0));
}

#[tokio::test]
async fn test_no_rebate_one_unit_past_limit() {
    let result = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(775_001), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(700_001));
    assert_eq!(result.rebate_87a, dec!(0));
    assert_eq!(result.tax_after_rebate, result.tax_before_rebate);
}

#[tokio::test]
async fn test_rebate_capped_at_maximum() {
    // Old regime: taxable 500,000 produces 12,500 of tax, exactly rebate_max.
    let result = service()
        .calculate("FY2025_26", RegimeCode::Old, dec!(550_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(500_000));
    assert_eq!(result.tax_before_rebate, dec!(12_500));
    assert_eq!(result.rebate_87a, dec!(12_500));
    assert_eq!(result.total_tax, dec!(0));
}

// ========================================================================
// Deductions
// ========================================================================

#[tokio::test]
async fn test_deduction_capped_at_section_limit() {
    let result = service()
        .calculate(
            "FY2025_26",
            RegimeCode::Old,
            dec!(1_000_000),
            &deductions(&[("80C", dec!(300_000))]),
        )
        .await
        .unwrap();

    assert_eq!(result.deductions_breakdown["80C"], dec!(150_000));
    assert_eq!(result.total_deductions, dec!(150_000));
    assert_eq!(result.taxable_income, dec!(800_000));
    assert_eq!(result.tax_before_rebate, dec!(72_500));
    assert_eq!(result.cess, dec!(2_900));
    assert_eq!(result.total_tax, dec!(75_400));
}

#[tokio::test]
async fn test_uncapped_section_applied_in_full() {
    let result = service()
        .calculate(
            "FY2025_26",
            RegimeCode::Old,
            dec!(2_000_000),
            &deductions(&[("80E", dec!(320_000))]),
        )
        .await
        .unwrap();

    assert_eq!(result.deductions_breakdown["80E"], dec!(320_000));
}

#[tokio::test]
async fn test_new_regime_ignores_deductions() {
    let with = service()
        .calculate(
            "FY2025_26",
            RegimeCode::New,
            dec!(1_200_000),
            &deductions(&[("80C", dec!(150_000)), ("80D", dec!(25_000))]),
        )
        .await
        .unwrap();
    let without = service()
        .calculate("FY2025_26", RegimeCode::New, dec!(1_200_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(with.total_deductions, dec!(0));
    assert!(with.deductions_breakdown.is_empty());
    assert_eq!(with, without);
}

#[tokio::test]
async fn test_non_positive_claims_skipped() {
    let result = service()
        .calculate(
            "FY2025_26",
            RegimeCode::Old,
            dec!(1_000_000),
            &deductions(&[("80C", dec!(0)), ("80D", dec!(-5_000))]),
        )
        .await
        .unwrap();

    assert_eq!(result.total_deductions, dec!(0));
    assert!(result.deductions_breakdown.is_empty());
}

// ========================================================================
// Surcharge
// ========================================================================

#[tokio::test]
async fn test_surcharge_applies_above_five_million() {
    let result = service()
        .calculate("FY2025_26", RegimeCode::Old, dec!(6_050_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(6_000_000));
    assert_eq!(result.tax_before_rebate, dec!(1_612_500));
    assert_eq!(result.surcharge, dec!(161_250));
    assert_eq!(result.cess, dec!(70_950));
    assert_eq!(result.total_tax, dec!(1_844_700));
}

#[tokio::test]
async fn test_no_surcharge_at_exactly_five_million() {
    // The band requires taxable income strictly above the threshold.
    let result = service()
        .calculate("FY2025_26", RegimeCode::Old, dec!(5_050_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(5_000_000));
    assert_eq!(result.surcharge, dec!(0));
}

#[rstest]
#[case(dec!(5_050_000), dec!(0))]
#[case(dec!(10_050_000), dec!(281_250))]
#[case(dec!(10_050_001), dec!(421_875))]
#[case(dec!(20_050_001), dec!(1_453_125))]
#[case(dec!(50_050_001), dec!(5_480_625))]
#[tokio::test]
async fn test_surcharge_band_selection(#[case] gross: Decimal, #[case] expected: Decimal) {
    // Old regime, no deductions: taxable income is gross minus 50,000, which
    // places each case just at or just past a surcharge threshold.
    let result = service()
        .calculate("FY2025_26", RegimeCode::Old, gross, &no_deductions())
        .await
        .unwrap();

    assert_eq!(result.surcharge, expected);
}

#[tokio::test]
async fn test_top_surcharge_band() {
    let result = service()
        .calculate(
            "FY2025_26",
            RegimeCode::Old,
            dec!(60_050_000),
            &no_deductions(),
        )
        .await
        .unwrap();

    assert_eq!(result.taxable_income, dec!(60_000_000));
    // 37% band: taxable income exceeds 50,000,000.
    assert_eq!(
        result.surcharge,
        super::calculator::TaxCalculator::round_currency(
            result.tax_after_rebate * dec!(37) / dec!(100)
        )
    );
}

// ========================================================================
// Comparison
// ========================================================================

#[tokio::test]
async fn test_comparator_recommends_cheaper_regime() {
    let comparison = service()
        .compare("FY2025_26", dec!(1_200_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(comparison.old_regime.total_tax, dec!(163_800));
    assert_eq!(comparison.new_regime.total_tax, dec!(71_500));
    assert_eq!(comparison.recommended_regime, RegimeCode::New);
    assert_eq!(comparison.savings_amount, dec!(92_300));
    assert_eq!(comparison.savings_percentage, dec!(7.69));
}

#[tokio::test]
async fn test_comparator_matches_standalone_runs() {
    let svc = service();
    let claimed = deductions(&[("80C", dec!(120_000))]);

    let comparison = svc.compare("FY2025_26", dec!(1_500_000), &claimed).await.unwrap();
    let old = svc
        .calculate("FY2025_26", RegimeCode::Old, dec!(1_500_000), &claimed)
        .await
        .unwrap();
    let new = svc
        .calculate("FY2025_26", RegimeCode::New, dec!(1_500_000), &claimed)
        .await
        .unwrap();

    assert_eq!(comparison.old_regime, old);
    assert_eq!(comparison.new_regime, new);
}

#[tokio::test]
async fn test_comparator_tie_keeps_old_regime() {
    // Both regimes configured identically: total tax ties exactly.
    let (old_regime, slabs) = fy2025_26()
        .regimes
        .into_iter()
        .find(|(r, _)| r.code == RegimeCode::Old)
        .unwrap();

    let mut mirrored = old_regime.clone();
    mirrored.code = RegimeCode::New;
    mirrored.allows_deductions = false;

    let mut repo = InMemoryRuleRepository::new();
    repo.insert(YearRules {
        year: FinancialYear {
            code: "FY_TIE".to_string(),
            display_name: "Tie year".to_string(),
            is_active: true,
        },
        regimes: vec![(old_regime, slabs.clone()), (mirrored, slabs)],
        deduction_limits: super::types::DeductionLimits::new(),
    });

    let comparison = TaxService::new(repo)
        .compare("FY_TIE", dec!(1_000_000), &no_deductions())
        .await
        .unwrap();

    assert_eq!(comparison.savings_amount, dec!(0));
    assert_eq!(comparison.recommended_regime, RegimeCode::Old);
}

// ========================================================================
// Rule resolution failures
// ========================================================================

#[tokio::test]
async fn test_unknown_year_not_found() {
    let err = service()
        .calculate("FY1999_00", RegimeCode::New, dec!(100_000), &no_deductions())
        .await
        .unwrap_err();

    assert_eq!(err, TaxError::YearNotFound("FY1999_00".to_string()));
    assert!(!err.is_server_fault());
}

#[tokio::test]
async fn test_inactive_year_not_found() {
    let mut rules = fy2025_26();
    rules.year.is_active = false;

    let mut repo = InMemoryRuleRepository::new();
    repo.insert(rules);

    let err = TaxService::new(repo)
        .calculate("FY2025_26", RegimeCode::New, dec!(100_000), &no_deductions())
        .await
        .unwrap_err();

    assert!(matches!(err, TaxError::YearNotFound(_)));
}

#[tokio::test]
async fn test_regime_without_slabs_is_server_fault() {
    let mut repo = InMemoryRuleRepository::new();
    repo.insert(YearRules {
        year: FinancialYear {
            code: "FY_BROKEN".to_string(),
            display_name: "Broken year".to_string(),
            is_active: true,
        },
        regimes: vec![(
            Regime {
                code: RegimeCode::New,
                display_name: "New Regime".to_string(),
                standard_deduction: dec!(75_000),
                rebate_limit: dec!(700_000),
                rebate_max: dec!(25_000),
                allows_deductions: false,
            },
            Vec::<TaxSlab>::new(),
        )],
        deduction_limits: super::types::DeductionLimits::new(),
    });

    let err = TaxService::new(repo)
        .calculate("FY_BROKEN", RegimeCode::New, dec!(100_000), &no_deductions())
        .await
        .unwrap_err();

    assert!(matches!(err, TaxError::MissingSlabs { .. }));
    assert!(err.is_server_fault());
}

#[tokio::test]
async fn test_missing_regime_not_found() {
    let mut rules = fy2025_26();
    rules.regimes.retain(|(r, _)| r.code == RegimeCode::Old);

    let mut repo = InMemoryRuleRepository::new();
    repo.insert(rules);

    let err = TaxService::new(repo)
        .calculate("FY2025_26", RegimeCode::New, dec!(100_000), &no_deductions())
        .await
        .unwrap_err();

    assert!(matches!(err, TaxError::RegimeNotFound { .. }));
}

#[tokio::test]
async fn test_rule_lookup_by_year_code() {
    let repo = InMemoryRuleRepository::with_builtin_years();

    let year = repo.financial_year("FY2024_25").await.unwrap();
    assert_eq!(year.display_name, "FY 2024-25");

    let limits = repo.deduction_limits("FY2025_26").await.unwrap();
    assert_eq!(limits["80C"], Some(dec!(150_000)));
    assert_eq!(limits["80E"], None);
}
