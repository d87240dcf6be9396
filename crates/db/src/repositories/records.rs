//! Insurance and loan record lookups for deduction discovery.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use chronyx_core::discovery::{InsurancePolicy, LoanAccount, LoanKind, PolicyKind};

use crate::entities::{insurance_policies, loan_accounts};

/// Error types for record lookups.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for a user's insurance and loan records.
#[derive(Debug, Clone)]
pub struct RecordsRepository {
    db: DatabaseConnection,
}

impl RecordsRepository {
    /// Creates a new records repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches a user's insurance policies as discovery inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn insurance_policies(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InsurancePolicy>, RecordsError> {
        let rows = insurance_policies::Entity::find()
            .filter(insurance_policies::Column::UserId.eq(user_id))
            .order_by_asc(insurance_policies::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| InsurancePolicy {
                id: r.id,
                name: r.name,
                kind: PolicyKind::parse(&r.policy_type),
                annual_premium: r.annual_premium,
            })
            .collect())
    }

    /// Fetches a user's loan accounts as discovery inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn loan_accounts(&self, user_id: Uuid) -> Result<Vec<LoanAccount>, RecordsError> {
        let rows = loan_accounts::Entity::find()
            .filter(loan_accounts::Column::UserId.eq(user_id))
            .order_by_asc(loan_accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| LoanAccount {
                id: r.id,
                name: r.name,
                kind: LoanKind::parse(&r.loan_type),
                annual_interest_paid: r.annual_interest_paid,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chronyx_core::discovery::{LoanKind, PolicyKind};

    #[test]
    fn test_policy_type_round_trip() {
        for kind in [
            PolicyKind::Health,
            PolicyKind::Life,
            PolicyKind::Vehicle,
            PolicyKind::Other,
        ] {
            assert_eq!(PolicyKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_stored_codes_fall_back_to_other() {
        assert_eq!(PolicyKind::parse("marine"), PolicyKind::Other);
        assert_eq!(LoanKind::parse("margin"), LoanKind::Other);
    }
}
