//! Postgres-backed rule repository.
//!
//! Implements the core [`RuleRepository`] trait over the rule tables. Rows
//! are read-only from the engine's perspective; the migrator and seeder own
//! them.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use chronyx_core::tax::{
    DeductionLimits, FinancialYear, Regime, RegimeCode, RegimeRules, RuleRepository, TaxError,
    TaxSlab,
};

use crate::entities::{deduction_rules, financial_years, tax_regimes, tax_slabs};

/// Rule repository over the Postgres rule tables.
#[derive(Debug, Clone)]
pub struct PgRuleRepository {
    db: DatabaseConnection,
}

impl PgRuleRepository {
    /// Creates a new rule repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_year(&self, code: &str) -> Result<financial_years::Model, TaxError> {
        financial_years::Entity::find()
            .filter(financial_years::Column::Code.eq(code))
            .filter(financial_years::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| TaxError::Storage(e.to_string()))?
            .ok_or_else(|| TaxError::YearNotFound(code.to_string()))
    }
}

fn map_year(model: &financial_years::Model) -> FinancialYear {
    FinancialYear {
        code: model.code.clone(),
        display_name: model.display_name.clone(),
        is_active: model.is_active,
    }
}

fn map_regime(model: &tax_regimes::Model) -> Result<Regime, TaxError> {
    let code = RegimeCode::parse(&model.code).ok_or_else(|| {
        TaxError::Configuration(format!("unknown regime code '{}' in store", model.code))
    })?;

    Ok(Regime {
        code,
        display_name: model.display_name.clone(),
        standard_deduction: model.standard_deduction,
        rebate_limit: model.rebate_limit,
        rebate_max: model.rebate_max,
        allows_deductions: model.allows_deductions,
    })
}

fn map_slab(model: &tax_slabs::Model) -> TaxSlab {
    TaxSlab {
        slab_order: model.slab_order,
        min_amount: model.min_amount,
        max_amount: model.max_amount,
        rate_percentage: model.rate_percentage,
    }
}

#[async_trait]
impl RuleRepository for PgRuleRepository {
    async fn financial_year(&self, code: &str) -> Result<FinancialYear, TaxError> {
        self.find_active_year(code).await.map(|m| map_year(&m))
    }

    async fn active_years(&self) -> Result<Vec<FinancialYear>, TaxError> {
        let rows = financial_years::Entity::find()
            .filter(financial_years::Column::IsActive.eq(true))
            .order_by_desc(financial_years::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| TaxError::Storage(e.to_string()))?;

        Ok(rows.iter().map(map_year).collect())
    }

    async fn regime_rules(
        &self,
        year_code: &str,
        regime: RegimeCode,
    ) -> Result<RegimeRules, TaxError> {
        let year = self.find_active_year(year_code).await?;

        let regime_row = tax_regimes::Entity::find()
            .filter(tax_regimes::Column::FinancialYearId.eq(year.id))
            .filter(tax_regimes::Column::Code.eq(regime.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| TaxError::Storage(e.to_string()))?
            .ok_or_else(|| TaxError::RegimeNotFound {
                year: year_code.to_string(),
                regime,
            })?;

        let slab_rows = tax_slabs::Entity::find()
            .filter(tax_slabs::Column::RegimeId.eq(regime_row.id))
            .order_by_asc(tax_slabs::Column::SlabOrder)
            .all(&self.db)
            .await
            .map_err(|e| TaxError::Storage(e.to_string()))?;

        if slab_rows.is_empty() {
            return Err(TaxError::MissingSlabs {
                year: year_code.to_string(),
                regime,
            });
        }

        Ok(RegimeRules {
            financial_year: map_year(&year),
            regime: map_regime(&regime_row)?,
            slabs: slab_rows.iter().map(map_slab).collect(),
        })
    }

    async fn deduction_limits(&self, year_code: &str) -> Result<DeductionLimits, TaxError> {
        let year = self.find_active_year(year_code).await?;

        let rows = deduction_rules::Entity::find()
            .filter(deduction_rules::Column::FinancialYearId.eq(year.id))
            .all(&self.db)
            .await
            .map_err(|e| TaxError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| (r.section_code, r.max_amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn regime_model(code: &str) -> tax_regimes::Model {
        tax_regimes::Model {
            id: Uuid::new_v4(),
            financial_year_id: Uuid::new_v4(),
            code: code.to_string(),
            display_name: "Test".to_string(),
            standard_deduction: dec!(50_000),
            rebate_limit: dec!(500_000),
            rebate_max: dec!(12_500),
            allows_deductions: true,
        }
    }

    #[test]
    fn test_map_regime_known_codes() {
        assert_eq!(map_regime(&regime_model("old")).unwrap().code, RegimeCode::Old);
        assert_eq!(map_regime(&regime_model("new")).unwrap().code, RegimeCode::New);
    }

    #[test]
    fn test_map_regime_unknown_code_is_configuration_fault() {
        let err = map_regime(&regime_model("flat")).unwrap_err();
        assert!(matches!(err, TaxError::Configuration(_)));
        assert!(err.is_server_fault());
    }

    #[test]
    fn test_map_slab_preserves_unbounded_upper() {
        let model = tax_slabs::Model {
            id: Uuid::new_v4(),
            regime_id: Uuid::new_v4(),
            slab_order: 4,
            min_amount: dec!(1_000_000),
            max_amount: None,
            rate_percentage: dec!(30),
        };

        let slab = map_slab(&model);
        assert_eq!(slab.max_amount, None);
        assert_eq!(slab.rate_percentage, dec!(30));
    }
}
