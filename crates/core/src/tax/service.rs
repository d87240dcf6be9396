//! Tax computation orchestration.
//!
//! Resolves rules through an injected [`RuleRepository`] and runs the pure
//! calculator/comparator. The service is stateless and user-agnostic; the
//! persistence boundary attaches user identity.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::calculator::TaxCalculator;
use super::comparator::RegimeComparator;
use super::error::TaxError;
use super::rules::RuleRepository;
use super::types::{ComparisonResult, DeductionLimits, RegimeCode, TaxCalculationResult};

/// Orchestrates rule resolution and calculation.
#[derive(Debug, Clone)]
pub struct TaxService<R> {
    rules: R,
}

impl<R: RuleRepository> TaxService<R> {
    /// Creates a service over a rule repository.
    #[must_use]
    pub const fn new(rules: R) -> Self {
        Self { rules }
    }

    /// Computes the full breakdown for one regime.
    ///
    /// # Errors
    ///
    /// `TaxError::NegativeIncome` before any lookup; rule-resolution errors
    /// as documented on [`RuleRepository`].
    pub async fn calculate(
        &self,
        year_code: &str,
        regime: RegimeCode,
        gross_income: Decimal,
        claimed_deductions: &BTreeMap<String, Decimal>,
    ) -> Result<TaxCalculationResult, TaxError> {
        if gross_income < Decimal::ZERO {
            return Err(TaxError::NegativeIncome);
        }

        let rules = self.rules.regime_rules(year_code, regime).await?;

        // The limit table only matters when the regime honors deductions.
        let limits = if rules.regime.allows_deductions {
            self.rules.deduction_limits(year_code).await?
        } else {
            DeductionLimits::new()
        };

        TaxCalculator::calculate(&rules, &limits, gross_income, claimed_deductions)
    }

    /// Runs both regimes over identical inputs and recommends the cheaper.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::calculate`]; both regimes must resolve.
    pub async fn compare(
        &self,
        year_code: &str,
        gross_income: Decimal,
        claimed_deductions: &BTreeMap<String, Decimal>,
    ) -> Result<ComparisonResult, TaxError> {
        let old_regime = self
            .calculate(year_code, RegimeCode::Old, gross_income, claimed_deductions)
            .await?;
        let new_regime = self
            .calculate(year_code, RegimeCode::New, gross_income, claimed_deductions)
            .await?;

        Ok(RegimeComparator::compare(old_regime, new_regime))
    }

    /// Returns the underlying rule repository.
    pub const fn rules(&self) -> &R {
        &self.rules
    }
}
