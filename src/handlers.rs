use axum::{http::StatusCode, response::Json};
use common::{ErrorResponse, IdError};
use compute::LookupError;
use tracing::error;

pub mod counties;
pub mod health;
pub mod industries;
pub mod trend;

/// Error half of every API handler's return type
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Maps a lookup failure to its HTTP status and error body
pub fn lookup_error_response(err: &LookupError) -> HandlerError {
    let status = match err {
        LookupError::IndustryNotSelected | LookupError::CountyNotSelected => StatusCode::BAD_REQUEST,
        LookupError::NoCountyData(_) | LookupError::NoIndustryData { .. } => StatusCode::NOT_FOUND,
        LookupError::Analysis(_) => {
            error!("Analysis failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.code(), err.to_string())))
}

/// 400 response for a malformed FIPS or NAICS path segment
pub fn invalid_identifier(err: &IdError) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("INVALID_IDENTIFIER", err.to_string())),
    )
}
