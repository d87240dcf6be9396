//! Calculation history repository.
//!
//! History rows are append-only: one insert per saved calculation, never
//! updated or deleted by the engine.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use chronyx_core::tax::TaxCalculationResult;
use chronyx_shared::types::PageRequest;

use crate::entities::tax_calculations;

/// Error types for calculation history operations.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    /// The breakdown could not be serialized for storage.
    #[error("Failed to serialize breakdown: {0}")]
    Serialization(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for the tax_calculations history table.
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    db: DatabaseConnection,
}

impl CalculationRepository {
    /// Creates a new calculation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts one immutable history row for a computed breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails. Callers treat
    /// a failed save as non-fatal and still return the computed result.
    pub async fn save(
        &self,
        user_id: Uuid,
        result: &TaxCalculationResult,
    ) -> Result<tax_calculations::Model, CalculationError> {
        let breakdown = serde_json::to_value(result)
            .map_err(|e| CalculationError::Serialization(e.to_string()))?;

        let row = tax_calculations::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            financial_year: Set(result.financial_year.clone()),
            regime: Set(result.regime.as_str().to_string()),
            gross_income: Set(result.gross_income),
            taxable_income: Set(result.taxable_income),
            total_tax: Set(result.total_tax),
            effective_rate: Set(result.effective_rate),
            breakdown: Set(breakdown),
            created_at: Set(Utc::now().into()),
        };

        Ok(row.insert(&self.db).await?)
    }

    /// Lists a user's saved calculations, newest first.
    ///
    /// Returns the page of rows plus the total row count for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<tax_calculations::Model>, u64), CalculationError> {
        let filter = tax_calculations::Column::UserId.eq(user_id);

        let total = tax_calculations::Entity::find()
            .filter(filter.clone())
            .count(&self.db)
            .await?;

        let rows = tax_calculations::Entity::find()
            .filter(filter)
            .order_by_desc(tax_calculations::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }
}
