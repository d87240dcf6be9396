//! `SeaORM` Entity for the tax_calculations history table.
//!
//! Append-only: rows are inserted once and never updated or deleted by the
//! engine. Scalar columns support listing; the full breakdown rides along as
//! JSON.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_calculations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub financial_year: String,
    pub regime: String,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    /// Full `TaxCalculationResult` serialized as JSON.
    pub breakdown: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
