//! Rule-table seeding from core presets.
//!
//! Used by the seeder binary and available to any environment that needs the
//! built-in year configurations written to Postgres.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use chronyx_core::tax::YearRules;

use crate::entities::{deduction_rules, financial_years, tax_regimes, tax_slabs};

/// Writes one year's rule set to the rule tables.
///
/// Idempotent per year: if the year code already exists nothing is written
/// and `Ok(false)` is returned; `Ok(true)` means the year was inserted.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub async fn seed_year_rules(db: &DatabaseConnection, rules: &YearRules) -> Result<bool, DbErr> {
    let existing = financial_years::Entity::find()
        .filter(financial_years::Column::Code.eq(rules.year.code.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let year_id = Uuid::new_v4();
    let now = Utc::now().into();

    financial_years::ActiveModel {
        id: Set(year_id),
        code: Set(rules.year.code.clone()),
        display_name: Set(rules.year.display_name.clone()),
        is_active: Set(rules.year.is_active),
        created_at: Set(now),
    }
    .insert(db)
    .await?;

    for (regime, slabs) in &rules.regimes {
        let regime_id = Uuid::new_v4();

        tax_regimes::ActiveModel {
            id: Set(regime_id),
            financial_year_id: Set(year_id),
            code: Set(regime.code.as_str().to_string()),
            display_name: Set(regime.display_name.clone()),
            standard_deduction: Set(regime.standard_deduction),
            rebate_limit: Set(regime.rebate_limit),
            rebate_max: Set(regime.rebate_max),
            allows_deductions: Set(regime.allows_deductions),
        }
        .insert(db)
        .await?;

        for slab in slabs {
            tax_slabs::ActiveModel {
                id: Set(Uuid::new_v4()),
                regime_id: Set(regime_id),
                slab_order: Set(slab.slab_order),
                min_amount: Set(slab.min_amount),
                max_amount: Set(slab.max_amount),
                rate_percentage: Set(slab.rate_percentage),
            }
            .insert(db)
            .await?;
        }
    }

    for (section_code, max_amount) in &rules.deduction_limits {
        deduction_rules::ActiveModel {
            id: Set(Uuid::new_v4()),
            financial_year_id: Set(year_id),
            section_code: Set(section_code.clone()),
            max_amount: Set(*max_amount),
        }
        .insert(db)
        .await?;
    }

    Ok(true)
}
