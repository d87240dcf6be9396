//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod calculation;
pub mod records;
pub mod rules;

pub use calculation::{CalculationError, CalculationRepository};
pub use records::{RecordsError, RecordsRepository};
pub use rules::PgRuleRepository;
