//! `SeaORM` Entity for the tax_slabs table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_slabs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub regime_id: Uuid,
    pub slab_order: i32,
    pub min_amount: Decimal,
    /// Exclusive upper bound; NULL marks the unbounded last slab.
    pub max_amount: Option<Decimal>,
    pub rate_percentage: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tax_regimes::Entity",
        from = "Column::RegimeId",
        to = "super::tax_regimes::Column::Id"
    )]
    TaxRegimes,
}

impl Related<super::tax_regimes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxRegimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
