//! Error-to-response mapping.
//!
//! Wraps the shared [`AppError`] taxonomy so handlers can `?` their way out
//! of domain errors. Server-side faults are logged with their full detail
//! and surfaced to callers with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use chronyx_core::tax::TaxError;
use chronyx_db::repositories::{CalculationError, RecordsError};
use chronyx_shared::AppError;

/// API error carrying the application taxonomy.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Builds a 400 validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl From<TaxError> for ApiError {
    fn from(err: TaxError) -> Self {
        let app_error = match &err {
            TaxError::NegativeIncome => AppError::Validation(err.to_string()),
            TaxError::YearNotFound(_) | TaxError::RegimeNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            TaxError::MissingSlabs { .. } | TaxError::Configuration(_) => {
                AppError::Configuration(err.to_string())
            }
            TaxError::Storage(_) => AppError::Database(err.to_string()),
        };
        Self(app_error)
    }
}

impl From<CalculationError> for ApiError {
    fn from(err: CalculationError) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<RecordsError> for ApiError {
    fn from(err: RecordsError) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Configuration and storage detail is for operators, not callers.
        let message = if status.is_server_error() {
            error!(error = %self.0, "request failed with server-side fault");
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronyx_core::tax::RegimeCode;
    use rstest::rstest;

    #[rstest]
    #[case(TaxError::NegativeIncome, 400, "VALIDATION_ERROR")]
    #[case(TaxError::YearNotFound("FY1999_00".into()), 404, "NOT_FOUND")]
    #[case(
        TaxError::RegimeNotFound { year: "FY2025_26".into(), regime: RegimeCode::New },
        404,
        "NOT_FOUND"
    )]
    #[case(
        TaxError::MissingSlabs { year: "FY2025_26".into(), regime: RegimeCode::New },
        500,
        "CONFIGURATION_ERROR"
    )]
    #[case(TaxError::Configuration("bad regime code".into()), 500, "CONFIGURATION_ERROR")]
    #[case(TaxError::Storage("connection reset".into()), 500, "DATABASE_ERROR")]
    fn test_tax_error_mapping(
        #[case] err: TaxError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        let api_error = ApiError::from(err);
        assert_eq!(api_error.0.status_code(), status);
        assert_eq!(api_error.0.error_code(), code);
    }

    #[test]
    fn test_validation_helper() {
        let err = ApiError::validation("regime must be 'old' or 'new'");
        assert_eq!(err.0.status_code(), 400);
    }
}
