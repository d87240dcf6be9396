//! Deduction discovery routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, middleware::AuthUser};
use chronyx_core::discovery::{DeductionSuggestion, DiscoveryEngine};
use chronyx_core::tax::RuleRepository;
use chronyx_db::repositories::{PgRuleRepository, RecordsRepository};

/// Creates the suggestion routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/tax/suggestions", get(list_suggestions))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for deduction discovery.
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// Financial year whose deduction limits apply.
    pub financial_year: String,
    /// Gross income used for the marginal-bracket savings estimate.
    pub gross_income: Decimal,
}

/// Discovery response.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    /// Financial year the limits came from.
    pub financial_year: String,
    /// Suggested deduction entries, biggest estimated saving first.
    pub suggestions: Vec<DeductionSuggestion>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /tax/suggestions
///
/// Scans the caller's insurance and loan records and suggests deduction
/// entries. Advisory only: nothing here feeds a calculation automatically.
async fn list_suggestions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    if query.gross_income < Decimal::ZERO {
        return Err(ApiError::validation("gross_income cannot be negative"));
    }

    let rules = PgRuleRepository::new((*state.db).clone());
    let limits = rules.deduction_limits(&query.financial_year).await?;

    let records = RecordsRepository::new((*state.db).clone());
    let policies = records.insurance_policies(auth_user.user_id()).await?;
    let loans = records.loan_accounts(auth_user.user_id()).await?;

    let suggestions = DiscoveryEngine::suggest(query.gross_income, &limits, &policies, &loans);

    Ok(Json(SuggestionsResponse {
        financial_year: query.financial_year,
        suggestions,
    }))
}
