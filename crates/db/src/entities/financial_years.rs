//! `SeaORM` Entity for the financial_years table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_years")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tax_regimes::Entity")]
    TaxRegimes,
    #[sea_orm(has_many = "super::deduction_rules::Entity")]
    DeductionRules,
}

impl Related<super::tax_regimes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxRegimes.def()
    }
}

impl Related<super::deduction_rules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeductionRules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
