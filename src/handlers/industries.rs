use axum::response::Json;
use common::{ApiResponse, IndustryDto, INDUSTRIES};
use tracing::{debug, instrument};

/// List the curated industry catalogue
#[utoipa::path(
    get,
    path = "/api/v1/industries",
    tag = "industries",
    responses(
        (status = 200, description = "Industry catalogue retrieved successfully", body = IndustryListApiResponse)
    )
)]
#[instrument]
pub async fn get_industries() -> Json<ApiResponse<Vec<IndustryDto>>> {
    let industries: Vec<IndustryDto> = INDUSTRIES.iter().map(IndustryDto::from).collect();
    debug!("Returning {} industries", industries.len());

    Json(ApiResponse {
        data: industries,
        message: "Industries retrieved successfully".to_string(),
        success: true,
    })
}
