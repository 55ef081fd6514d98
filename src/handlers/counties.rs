use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{ApiResponse, CountyDto};
use compute::DEFAULT_SUGGESTION_LIMIT;
use tracing::{debug, instrument, trace};

use crate::schemas::{AppState, CountySearchQuery};

/// Search counties by name for the autocomplete
#[utoipa::path(
    get,
    path = "/api/v1/counties/search",
    tag = "counties",
    params(CountySearchQuery),
    responses(
        (status = 200, description = "Matching counties retrieved successfully", body = CountyListApiResponse),
        (status = 400, description = "Query too short or limit out of range")
    )
)]
#[instrument(skip(state))]
pub async fn search_counties(
    Valid(Query(query)): Valid<Query<CountySearchQuery>>,
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<CountyDto>>> {
    trace!("Entering search_counties function");

    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let matches: Vec<CountyDto> = state
        .tables
        .counties
        .search(&query.q, limit)
        .into_iter()
        .cloned()
        .collect();

    debug!("Found {} counties matching {:?}", matches.len(), query.q);

    let message = if matches.is_empty() {
        "No counties found".to_string()
    } else {
        "Counties retrieved successfully".to_string()
    };

    Json(ApiResponse {
        data: matches,
        message,
        success: true,
    })
}
