//! `SeaORM` entity definitions.

pub mod deduction_rules;
pub mod financial_years;
pub mod insurance_policies;
pub mod loan_accounts;
pub mod tax_calculations;
pub mod tax_regimes;
pub mod tax_slabs;
pub mod users;
