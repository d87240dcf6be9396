//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tax_calculations::Entity")]
    TaxCalculations,
    #[sea_orm(has_many = "super::insurance_policies::Entity")]
    InsurancePolicies,
    #[sea_orm(has_many = "super::loan_accounts::Entity")]
    LoanAccounts,
}

impl Related<super::tax_calculations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxCalculations.def()
    }
}

impl Related<super::insurance_policies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InsurancePolicies.def()
    }
}

impl Related<super::loan_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoanAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
