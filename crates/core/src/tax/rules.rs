//! Rule repository abstraction and in-memory implementation.
//!
//! The calculator never talks to storage directly; it receives resolved
//! [`RegimeRules`] and [`DeductionLimits`]. Implementations are read-only
//! lookups with no side effects. The Postgres-backed implementation lives in
//! the db crate; the in-memory one here backs unit tests and the seeder.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::error::TaxError;
use super::presets::{YearRules, builtin_years};
use super::types::{DeductionLimits, FinancialYear, RegimeCode, RegimeRules};

/// Read-only access to jurisdiction/year/regime configuration.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Resolves an active financial year by code.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::YearNotFound` if the year is absent or inactive.
    async fn financial_year(&self, code: &str) -> Result<FinancialYear, TaxError>;

    /// Lists all active financial years.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::Storage` if the backing store fails.
    async fn active_years(&self) -> Result<Vec<FinancialYear>, TaxError>;

    /// Resolves a regime and its slab table, ordered by `slab_order`.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::YearNotFound` if the year is absent or inactive,
    /// `TaxError::RegimeNotFound` if the regime is missing for the year, and
    /// `TaxError::MissingSlabs` if the regime resolves with an empty slab
    /// table.
    async fn regime_rules(
        &self,
        year_code: &str,
        regime: RegimeCode,
    ) -> Result<RegimeRules, TaxError>;

    /// Resolves the deduction limit table for a year.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::YearNotFound` if the year is absent or inactive.
    async fn deduction_limits(&self, year_code: &str) -> Result<DeductionLimits, TaxError>;
}

/// In-memory rule repository.
///
/// Deterministic and I/O-free; preload it with [`builtin_years`] or hand-built
/// [`YearRules`] for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleRepository {
    years: BTreeMap<String, YearRules>,
}

impl InMemoryRuleRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository preloaded with the built-in year presets.
    #[must_use]
    pub fn with_builtin_years() -> Self {
        let mut repo = Self::new();
        for year in builtin_years() {
            repo.insert(year);
        }
        repo
    }

    /// Inserts or replaces one year's rule set.
    pub fn insert(&mut self, rules: YearRules) {
        self.years.insert(rules.year.code.clone(), rules);
    }

    fn active_year(&self, code: &str) -> Result<&YearRules, TaxError> {
        self.years
            .get(code)
            .filter(|y| y.year.is_active)
            .ok_or_else(|| TaxError::YearNotFound(code.to_string()))
    }
}

#[async_trait]
impl RuleRepository for InMemoryRuleRepository {
    async fn financial_year(&self, code: &str) -> Result<FinancialYear, TaxError> {
        self.active_year(code).map(|y| y.year.clone())
    }

    async fn active_years(&self) -> Result<Vec<FinancialYear>, TaxError> {
        Ok(self
            .years
            .values()
            .filter(|y| y.year.is_active)
            .map(|y| y.year.clone())
            .collect())
    }

    async fn regime_rules(
        &self,
        year_code: &str,
        regime: RegimeCode,
    ) -> Result<RegimeRules, TaxError> {
        let year = self.active_year(year_code)?;

        let (config, slabs) = year
            .regimes
            .iter()
            .find(|(r, _)| r.code == regime)
            .ok_or_else(|| TaxError::RegimeNotFound {
                year: year_code.to_string(),
                regime,
            })?;

        if slabs.is_empty() {
            return Err(TaxError::MissingSlabs {
                year: year_code.to_string(),
                regime,
            });
        }

        let mut slabs = slabs.clone();
        slabs.sort_by_key(|s| s.slab_order);

        Ok(RegimeRules {
            financial_year: year.year.clone(),
            regime: config.clone(),
            slabs,
        })
    }

    async fn deduction_limits(&self, year_code: &str) -> Result<DeductionLimits, TaxError> {
        self.active_year(year_code)
            .map(|y| y.deduction_limits.clone())
    }
}
