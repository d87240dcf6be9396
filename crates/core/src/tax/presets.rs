//! Built-in financial year rule sets.
//!
//! These are the published slab tables, rebate thresholds, and deduction
//! limits per financial year. The seeder writes them to the rule tables;
//! the in-memory repository serves them directly in tests.

use rust_decimal::Decimal;

use super::types::{DeductionLimits, FinancialYear, Regime, RegimeCode, TaxSlab};

/// One financial year's complete rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRules {
    /// The financial year.
    pub year: FinancialYear,
    /// Regime configurations with their slab tables.
    pub regimes: Vec<(Regime, Vec<TaxSlab>)>,
    /// Section deduction caps for the year.
    pub deduction_limits: DeductionLimits,
}

/// All built-in financial years, newest first.
#[must_use]
pub fn builtin_years() -> Vec<YearRules> {
    vec![fy2025_26(), fy2024_25()]
}

fn rupees(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn percent(rate: i64) -> Decimal {
    Decimal::from(rate)
}

fn slab(order: i32, min: i64, max: Option<i64>, rate: i64) -> TaxSlab {
    TaxSlab {
        slab_order: order,
        min_amount: rupees(min),
        max_amount: max.map(rupees),
        rate_percentage: percent(rate),
    }
}

/// The old-regime slab table has been stable across the built-in years.
fn old_regime() -> (Regime, Vec<TaxSlab>) {
    (
        Regime {
            code: RegimeCode::Old,
            display_name: "Old Regime".to_string(),
            standard_deduction: rupees(50_000),
            rebate_limit: rupees(500_000),
            rebate_max: rupees(12_500),
            allows_deductions: true,
        },
        vec![
            slab(1, 0, Some(250_000), 0),
            slab(2, 250_000, Some(500_000), 5),
            slab(3, 500_000, Some(1_000_000), 20),
            slab(4, 1_000_000, None, 30),
        ],
    )
}

fn deduction_limits() -> DeductionLimits {
    let mut limits = DeductionLimits::new();
    limits.insert("80C".to_string(), Some(rupees(150_000)));
    limits.insert("80CCD1B".to_string(), Some(rupees(50_000)));
    limits.insert("80D".to_string(), Some(rupees(25_000)));
    limits.insert("80E".to_string(), None);
    limits.insert("80G".to_string(), None);
    limits.insert("80TTA".to_string(), Some(rupees(10_000)));
    limits.insert("24B".to_string(), Some(rupees(200_000)));
    limits
}

/// FY 2025-26: new regime with the 75,000 standard deduction.
#[must_use]
pub fn fy2025_26() -> YearRules {
    YearRules {
        year: FinancialYear {
            code: "FY2025_26".to_string(),
            display_name: "FY 2025-26".to_string(),
            is_active: true,
        },
        regimes: vec![
            old_regime(),
            (
                Regime {
                    code: RegimeCode::New,
                    display_name: "New Regime".to_string(),
                    standard_deduction: rupees(75_000),
                    rebate_limit: rupees(700_000),
                    rebate_max: rupees(25_000),
                    allows_deductions: false,
                },
                vec![
                    slab(1, 0, Some(300_000), 0),
                    slab(2, 300_000, Some(700_000), 5),
                    slab(3, 700_000, Some(1_000_000), 10),
                    slab(4, 1_000_000, Some(1_200_000), 15),
                    slab(5, 1_200_000, Some(1_500_000), 20),
                    slab(6, 1_500_000, None, 30),
                ],
            ),
        ],
        deduction_limits: deduction_limits(),
    }
}

/// FY 2024-25: new regime still on the 50,000 standard deduction and the
/// six-lakh-step slab table.
#[must_use]
pub fn fy2024_25() -> YearRules {
    YearRules {
        year: FinancialYear {
            code: "FY2024_25".to_string(),
            display_name: "FY 2024-25".to_string(),
            is_active: true,
        },
        regimes: vec![
            old_regime(),
            (
                Regime {
                    code: RegimeCode::New,
                    display_name: "New Regime".to_string(),
                    standard_deduction: rupees(50_000),
                    rebate_limit: rupees(700_000),
                    rebate_max: rupees(25_000),
                    allows_deductions: false,
                },
                vec![
                    slab(1, 0, Some(300_000), 0),
                    slab(2, 300_000, Some(600_000), 5),
                    slab(3, 600_000, Some(900_000), 10),
                    slab(4, 900_000, Some(1_200_000), 15),
                    slab(5, 1_200_000, Some(1_500_000), 20),
                    slab(6, 1_500_000, None, 30),
                ],
            ),
        ],
        deduction_limits: deduction_limits(),
    }
}
