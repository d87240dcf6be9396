//! Financial year and slab table display routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use chronyx_core::tax::{
    DeductionLimits, Regime, RegimeCode, RuleRepository, TaxError, TaxSlab,
};
use chronyx_db::repositories::PgRuleRepository;

/// Creates the year listing routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/tax/years", get(list_years))
}

// ============================================================================
// Response Types
// ============================================================================

/// One financial year with its regimes and deduction limits.
#[derive(Debug, Serialize)]
pub struct YearResponse {
    /// Year code.
    pub code: String,
    /// Display name.
    pub display_name: String,
    /// Configured regimes with their bracket tables.
    pub regimes: Vec<RegimeResponse>,
    /// Section deduction caps for the year.
    pub deduction_limits: DeductionLimits,
}

/// A regime and its slab table for display.
#[derive(Debug, Serialize)]
pub struct RegimeResponse {
    /// Regime configuration.
    #[serde(flatten)]
    pub regime: Regime,
    /// Slabs in evaluation order.
    pub slabs: Vec<TaxSlab>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /tax/years
///
/// Lists active financial years with their full bracket tables so clients
/// can render the slab breakdown before running a calculation.
async fn list_years(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<YearResponse>>, ApiError> {
    let repo = PgRuleRepository::new((*state.db).clone());

    let mut years = Vec::new();
    for year in repo.active_years().await? {
        let mut regimes = Vec::new();
        for code in [RegimeCode::Old, RegimeCode::New] {
            match repo.regime_rules(&year.code, code).await {
                Ok(rules) => regimes.push(RegimeResponse {
                    regime: rules.regime,
                    slabs: rules.slabs,
                }),
                // A year published with a single regime is displayable.
                Err(TaxError::RegimeNotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let deduction_limits = repo.deduction_limits(&year.code).await?;

        years.push(YearResponse {
            code: year.code,
            display_name: year.display_name,
            regimes,
            deduction_limits,
        });
    }

    Ok(Json(years))
}
