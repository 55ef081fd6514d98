use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{ApiResponse, CountyFips, IndustryCode, LookupResponse};
use tracing::{debug, info, instrument, trace, warn};

use super::{invalid_identifier, lookup_error_response, HandlerError};
use crate::schemas::AppState;

/// Peak and trend analysis for one county and industry
#[utoipa::path(
    get,
    path = "/api/v1/counties/{fips}/industries/{code}/trend",
    tag = "trend",
    params(
        ("fips" = String, Path, description = "5-digit county FIPS code", example = "42101"),
        ("code" = String, Path, description = "NAICS industry code", example = "5411"),
    ),
    responses(
        (status = 200, description = "Trend analysis computed successfully", body = LookupApiResponse),
        (status = 400, description = "Malformed FIPS or NAICS code", body = ErrorResponse),
        (status = 404, description = "No data for this county or industry", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_trend(
    Path((fips, code)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LookupResponse>>, HandlerError> {
    trace!("Entering get_trend function");

    let fips = CountyFips::parse(&fips).map_err(|e| {
        warn!("Rejected county FIPS {:?}: {}", fips, e);
        invalid_identifier(&e)
    })?;
    let code = IndustryCode::parse(&code).map_err(|e| {
        warn!("Rejected industry code {:?}: {}", code, e);
        invalid_identifier(&e)
    })?;

    let lookup = state.tables.lookup(&fips, &code).map_err(|e| {
        debug!("Lookup failed for {}/{}: {}", fips, code, e);
        lookup_error_response(&e)
    })?;

    info!(
        county = %fips,
        industry = %code,
        trend = ?lookup.summary.trend,
        "Trend computed"
    );

    Ok(Json(ApiResponse {
        data: lookup.into_response(),
        message: "Trend computed successfully".to_string(),
        success: true,
    }))
}
