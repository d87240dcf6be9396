//! `SeaORM` Entity for the tax_regimes table.
//!
//! One row per (financial year, regime code); the code column holds the wire
//! value "old" or "new".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_regimes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub financial_year_id: Uuid,
    pub code: String,
    pub display_name: String,
    pub standard_deduction: Decimal,
    pub rebate_limit: Decimal,
    pub rebate_max: Decimal,
    pub allows_deductions: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::financial_years::Entity",
        from = "Column::FinancialYearId",
        to = "super::financial_years::Column::Id"
    )]
    FinancialYears,
    #[sea_orm(has_many = "super::tax_slabs::Entity")]
    TaxSlabs,
}

impl Related<super::financial_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialYears.def()
    }
}

impl Related<super::tax_slabs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxSlabs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
