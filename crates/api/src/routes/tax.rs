//! Tax calculation, comparison, and history routes.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use chronyx_core::tax::{ComparisonResult, RegimeCode, TaxCalculationResult, TaxService};
use chronyx_db::repositories::{CalculationRepository, PgRuleRepository};
use chronyx_shared::types::{PageRequest, PageResponse};

/// Creates the tax routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tax/calculate", post(calculate_tax))
        .route("/tax/compare", post(compare_regimes))
        .route("/tax/calculations", get(list_calculations))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a single-regime calculation.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Financial year code, e.g. "FY2025_26".
    pub financial_year: String,
    /// Regime code: "old" or "new".
    pub regime: String,
    /// Gross income in whole currency units.
    pub gross_income: Decimal,
    /// Claimed deductions per section code.
    #[serde(default)]
    pub deductions: Option<BTreeMap<String, Decimal>>,
    /// Whether to persist the result to the calculation history.
    #[serde(default)]
    pub save_calculation: Option<bool>,
}

/// Request body for an old-vs-new comparison. Both regimes are computed.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    /// Financial year code.
    pub financial_year: String,
    /// Gross income in whole currency units.
    pub gross_income: Decimal,
    /// Claimed deductions per section code (ignored by the new regime).
    #[serde(default)]
    pub deductions: Option<BTreeMap<String, Decimal>>,
}

/// One saved calculation in the history listing.
#[derive(Debug, Serialize)]
pub struct CalculationSummary {
    /// History row ID.
    pub id: Uuid,
    /// Financial year code.
    pub financial_year: String,
    /// Regime code.
    pub regime: String,
    /// Gross income.
    pub gross_income: Decimal,
    /// Taxable income.
    pub taxable_income: Decimal,
    /// Total tax payable.
    pub total_tax: Decimal,
    /// Effective rate percentage.
    pub effective_rate: Decimal,
    /// Full breakdown as stored.
    pub breakdown: serde_json::Value,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /tax/calculate
///
/// Runs the single-regime pipeline and optionally appends the result to the
/// caller's calculation history.
async fn calculate_tax(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<TaxCalculationResult>, ApiError> {
    let regime = RegimeCode::parse(&request.regime)
        .ok_or_else(|| ApiError::validation("regime must be 'old' or 'new'"))?;

    let deductions = request.deductions.unwrap_or_default();

    let service = TaxService::new(PgRuleRepository::new((*state.db).clone()));
    let result = service
        .calculate(
            &request.financial_year,
            regime,
            request.gross_income,
            &deductions,
        )
        .await?;

    if request.save_calculation.unwrap_or(false) {
        // A failed save is non-fatal: the caller still gets the breakdown.
        let repo = CalculationRepository::new((*state.db).clone());
        match repo.save(auth_user.user_id(), &result).await {
            Ok(row) => info!(calculation_id = %row.id, "Saved calculation"),
            Err(e) => error!(error = %e, "Failed to save calculation"),
        }
    }

    Ok(Json(result))
}

/// POST /tax/compare
///
/// Runs both regimes over identical inputs and recommends the cheaper one.
async fn compare_regimes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let deductions = request.deductions.unwrap_or_default();

    let service = TaxService::new(PgRuleRepository::new((*state.db).clone()));
    let comparison = service
        .compare(&request.financial_year, request.gross_income, &deductions)
        .await?;

    Ok(Json(comparison))
}

/// GET /tax/calculations
///
/// Lists the caller's saved calculations, newest first.
async fn list_calculations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<CalculationSummary>>, ApiError> {
    let repo = CalculationRepository::new((*state.db).clone());
    let (rows, total) = repo.list_for_user(auth_user.user_id(), &page).await?;

    let summaries = rows
        .into_iter()
        .map(|row| CalculationSummary {
            id: row.id,
            financial_year: row.financial_year,
            regime: row.regime,
            gross_income: row.gross_income,
            taxable_income: row.taxable_income,
            total_tax: row.total_tax,
            effective_rate: row.effective_rate,
            breakdown: row.breakdown,
            created_at: row.created_at.to_rfc3339(),
        })
        .collect();

    Ok(Json(PageResponse::new(
        summaries,
        page.page,
        page.per_page,
        total,
    )))
}
