//! Initial database migration.
//!
//! Creates the user, rule-configuration, calculation-history, and
//! record tables with their indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: USERS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 2: TAX RULE CONFIGURATION
        // ============================================================
        db.execute_unprepared(FINANCIAL_YEARS_SQL).await?;
        db.execute_unprepared(TAX_REGIMES_SQL).await?;
        db.execute_unprepared(TAX_SLABS_SQL).await?;
        db.execute_unprepared(DEDUCTION_RULES_SQL).await?;

        // ============================================================
        // PART 3: CALCULATION HISTORY
        // ============================================================
        db.execute_unprepared(TAX_CALCULATIONS_SQL).await?;

        // ============================================================
        // PART 4: INSURANCE & LOAN RECORDS
        // ============================================================
        db.execute_unprepared(INSURANCE_POLICIES_SQL).await?;
        db.execute_unprepared(LOAN_ACCOUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const FINANCIAL_YEARS_SQL: &str = r"
CREATE TABLE financial_years (
    id UUID PRIMARY KEY,
    code VARCHAR(32) NOT NULL UNIQUE,
    display_name VARCHAR(64) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TAX_REGIMES_SQL: &str = r"
CREATE TABLE tax_regimes (
    id UUID PRIMARY KEY,
    financial_year_id UUID NOT NULL REFERENCES financial_years(id) ON DELETE CASCADE,
    code VARCHAR(8) NOT NULL CHECK (code IN ('old', 'new')),
    display_name VARCHAR(64) NOT NULL,
    standard_deduction NUMERIC(15, 2) NOT NULL CHECK (standard_deduction >= 0),
    rebate_limit NUMERIC(15, 2) NOT NULL CHECK (rebate_limit >= 0),
    rebate_max NUMERIC(15, 2) NOT NULL CHECK (rebate_max >= 0),
    allows_deductions BOOLEAN NOT NULL,
    UNIQUE (financial_year_id, code)
);
";

const TAX_SLABS_SQL: &str = r"
CREATE TABLE tax_slabs (
    id UUID PRIMARY KEY,
    regime_id UUID NOT NULL REFERENCES tax_regimes(id) ON DELETE CASCADE,
    slab_order INTEGER NOT NULL,
    min_amount NUMERIC(15, 2) NOT NULL CHECK (min_amount >= 0),
    max_amount NUMERIC(15, 2) CHECK (max_amount IS NULL OR max_amount > min_amount),
    rate_percentage NUMERIC(5, 2) NOT NULL CHECK (rate_percentage >= 0),
    UNIQUE (regime_id, slab_order)
);

CREATE INDEX idx_tax_slabs_regime ON tax_slabs(regime_id, slab_order);
";

const DEDUCTION_RULES_SQL: &str = r"
CREATE TABLE deduction_rules (
    id UUID PRIMARY KEY,
    financial_year_id UUID NOT NULL REFERENCES financial_years(id) ON DELETE CASCADE,
    section_code VARCHAR(16) NOT NULL,
    max_amount NUMERIC(15, 2) CHECK (max_amount IS NULL OR max_amount >= 0),
    UNIQUE (financial_year_id, section_code)
);
";

const TAX_CALCULATIONS_SQL: &str = r"
CREATE TABLE tax_calculations (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    financial_year VARCHAR(32) NOT NULL,
    regime VARCHAR(8) NOT NULL,
    gross_income NUMERIC(15, 2) NOT NULL,
    taxable_income NUMERIC(15, 2) NOT NULL,
    total_tax NUMERIC(15, 2) NOT NULL,
    effective_rate NUMERIC(7, 2) NOT NULL,
    breakdown JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_tax_calculations_user ON tax_calculations(user_id, created_at DESC);
";

const INSURANCE_POLICIES_SQL: &str = r"
CREATE TABLE insurance_policies (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    policy_type VARCHAR(16) NOT NULL,
    annual_premium NUMERIC(15, 2) NOT NULL CHECK (annual_premium >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_insurance_policies_user ON insurance_policies(user_id);
";

const LOAN_ACCOUNTS_SQL: &str = r"
CREATE TABLE loan_accounts (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    loan_type VARCHAR(16) NOT NULL,
    annual_interest_paid NUMERIC(15, 2) NOT NULL CHECK (annual_interest_paid >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_loan_accounts_user ON loan_accounts(user_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS loan_accounts;
DROP TABLE IF EXISTS insurance_policies;
DROP TABLE IF EXISTS tax_calculations;
DROP TABLE IF EXISTS deduction_rules;
DROP TABLE IF EXISTS tax_slabs;
DROP TABLE IF EXISTS tax_regimes;
DROP TABLE IF EXISTS financial_years;
DROP TABLE IF EXISTS users;
";
