//! Suggestion heuristics over insurance and loan records.

use rust_decimal::Decimal;

use super::types::{DeductionSuggestion, InsurancePolicy, LoanAccount, LoanKind, PolicyKind};
use crate::tax::{DeductionLimits, TaxCalculator};

/// Coarse marginal brackets used only for the savings estimate, upper bound
/// of gross income (exclusive) and rate percent. Old-regime shaped.
const MARGINAL_BRACKETS: [(i64, i64); 3] = [(250_000, 0), (500_000, 5), (1_000_000, 20)];

/// Marginal rate above the last bracket bound.
const TOP_MARGINAL_RATE: i64 = 30;

/// Best-effort deduction suggestion engine.
pub struct DiscoveryEngine;

impl DiscoveryEngine {
    /// Derives deduction suggestions from a user's records.
    ///
    /// Amounts are capped at the year's section limits; records that map to
    /// no section, or carry a non-positive amount, produce nothing.
    #[must_use]
    pub fn suggest(
        gross_income: Decimal,
        limits: &DeductionLimits,
        policies: &[InsurancePolicy],
        loans: &[LoanAccount],
    ) -> Vec<DeductionSuggestion> {
        let marginal_rate = Self::marginal_rate(gross_income);
        let mut suggestions = Vec::new();

        for policy in policies {
            let (section, confidence) = match policy.kind {
                PolicyKind::Health => ("80D", Decimal::new(90, 2)),
                PolicyKind::Life => ("80C", Decimal::new(90, 2)),
                PolicyKind::Vehicle | PolicyKind::Other => continue,
            };

            if let Some(suggestion) = Self::build(
                section,
                policy.annual_premium,
                confidence,
                marginal_rate,
                limits,
                &format!("{} premium for '{}'", policy.kind_label(), policy.name),
            ) {
                suggestions.push(suggestion);
            }
        }

        for loan in loans {
            let (section, confidence) = match loan.kind {
                LoanKind::Home => ("24B", Decimal::new(70, 2)),
                LoanKind::Education => ("80E", Decimal::new(70, 2)),
                LoanKind::Personal | LoanKind::Vehicle | LoanKind::Other => continue,
            };

            if let Some(suggestion) = Self::build(
                section,
                loan.annual_interest_paid,
                confidence,
                marginal_rate,
                limits,
                &format!("{} interest for '{}'", loan.kind_label(), loan.name),
            ) {
                suggestions.push(suggestion);
            }
        }

        // Biggest estimated saving first; section code breaks ties so the
        // ordering stays deterministic.
        suggestions.sort_by(|a, b| {
            b.estimated_saving
                .cmp(&a.estimated_saving)
                .then_with(|| a.section_code.cmp(&b.section_code))
        });
        suggestions
    }

    fn build(
        section: &str,
        amount: Decimal,
        confidence: Decimal,
        marginal_rate: Decimal,
        limits: &DeductionLimits,
        source: &str,
    ) -> Option<DeductionSuggestion> {
        if amount <= Decimal::ZERO {
            return None;
        }

        let suggested_amount = match limits.get(section) {
            Some(Some(limit)) => amount.min(*limit),
            _ => amount,
        };

        let estimated_saving =
            TaxCalculator::round_currency(suggested_amount * marginal_rate / Decimal::ONE_HUNDRED);

        Some(DeductionSuggestion {
            section_code: section.to_string(),
            suggested_amount,
            confidence,
            estimated_saving,
            source: source.to_string(),
        })
    }

    /// Marginal bracket rate for a gross income.
    fn marginal_rate(gross_income: Decimal) -> Decimal {
        for (bound, rate) in MARGINAL_BRACKETS {
            if gross_income <= Decimal::from(bound) {
                return Decimal::from(rate);
            }
        }
        Decimal::from(TOP_MARGINAL_RATE)
    }
}

impl InsurancePolicy {
    fn kind_label(&self) -> &'static str {
        match self.kind {
            PolicyKind::Health => "Health insurance",
            PolicyKind::Life => "Life insurance",
            PolicyKind::Vehicle => "Vehicle insurance",
            PolicyKind::Other => "Insurance",
        }
    }
}

impl LoanAccount {
    fn kind_label(&self) -> &'static str {
        match self.kind {
            LoanKind::Home => "Home loan",
            LoanKind::Education => "Education loan",
            LoanKind::Personal => "Personal loan",
            LoanKind::Vehicle => "Vehicle loan",
            LoanKind::Other => "Loan",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::presets::fy2025_26;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn health_policy(premium: Decimal) -> InsurancePolicy {
        InsurancePolicy {
            id: Uuid::new_v4(),
            name: "Family floater".to_string(),
            kind: PolicyKind::Health,
            annual_premium: premium,
        }
    }

    fn home_loan(interest: Decimal) -> LoanAccount {
        LoanAccount {
            id: Uuid::new_v4(),
            name: "Apartment".to_string(),
            kind: LoanKind::Home,
            annual_interest_paid: interest,
        }
    }

    #[test]
    fn test_health_premium_maps_to_80d_capped() {
        let limits = fy2025_26().deduction_limits;
        let suggestions = DiscoveryEngine::suggest(
            dec!(1_200_000),
            &limits,
            &[health_policy(dec!(40_000))],
            &[],
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].section_code, "80D");
        assert_eq!(suggestions[0].suggested_amount, dec!(25_000));
        assert_eq!(suggestions[0].confidence, dec!(0.90));
        // 30% marginal bracket above 1,000,000.
        assert_eq!(suggestions[0].estimated_saving, dec!(7_500));
    }

    #[test]
    fn test_home_loan_interest_maps_to_24b() {
        let limits = fy2025_26().deduction_limits;
        let suggestions =
            DiscoveryEngine::suggest(dec!(800_000), &limits, &[], &[home_loan(dec!(250_000))]);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].section_code, "24B");
        assert_eq!(suggestions[0].suggested_amount, dec!(200_000));
        // 20% marginal bracket between 500,000 and 1,000,000.
        assert_eq!(suggestions[0].estimated_saving, dec!(40_000));
    }

    #[test]
    fn test_unmapped_records_produce_nothing() {
        let limits = fy2025_26().deduction_limits;
        let suggestions = DiscoveryEngine::suggest(
            dec!(1_000_000),
            &limits,
            &[InsurancePolicy {
                id: Uuid::new_v4(),
                name: "Car cover".to_string(),
                kind: PolicyKind::Vehicle,
                annual_premium: dec!(15_000),
            }],
            &[LoanAccount {
                id: Uuid::new_v4(),
                name: "Holiday".to_string(),
                kind: LoanKind::Personal,
                annual_interest_paid: dec!(60_000),
            }],
        );

        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_zero_premium_skipped() {
        let limits = fy2025_26().deduction_limits;
        let suggestions =
            DiscoveryEngine::suggest(dec!(1_000_000), &limits, &[health_policy(dec!(0))], &[]);

        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_sorted_by_estimated_saving() {
        let limits = fy2025_26().deduction_limits;
        let suggestions = DiscoveryEngine::suggest(
            dec!(2_000_000),
            &limits,
            &[health_policy(dec!(20_000))],
            &[home_loan(dec!(180_000))],
        );

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].section_code, "24B");
        assert_eq!(suggestions[1].section_code, "80D");
        assert!(suggestions[0].estimated_saving >= suggestions[1].estimated_saving);
    }

    #[test]
    fn test_low_income_has_zero_saving_estimate() {
        let limits = fy2025_26().deduction_limits;
        let suggestions =
            DiscoveryEngine::suggest(dec!(200_000), &limits, &[health_policy(dec!(10_000))], &[]);

        assert_eq!(suggestions[0].estimated_saving, dec!(0));
    }
}
