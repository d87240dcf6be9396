//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the tax rule and history tables
//! - Repository abstractions for data access
//! - Database migrations and rule-set seeding

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod seed;

pub use repositories::{CalculationRepository, PgRuleRepository, RecordsRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
