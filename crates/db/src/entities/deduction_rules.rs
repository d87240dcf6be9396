//! `SeaORM` Entity for the deduction_rules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "deduction_rules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub financial_year_id: Uuid,
    pub section_code: String,
    /// NULL means the section is uncapped.
    pub max_amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::financial_years::Entity",
        from = "Column::FinancialYearId",
        to = "super::financial_years::Column::Id"
    )]
    FinancialYears,
}

impl Related<super::financial_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
