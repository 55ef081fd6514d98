use common::{
    ChartSeries, CountyDto, CountyListApiResponse, ErrorResponse, IndustryDto,
    IndustryListApiResponse, LookupApiResponse, LookupResponse, TrendKind, TrendSummary,
};
use compute::Tables;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Both static tables, loaded once at startup
    pub tables: Arc<Tables>,
    /// Directory the tables were read from, also served under `/data`
    pub data_dir: PathBuf,
    /// Directory holding the built frontend
    pub web_dir: PathBuf,
}

/// Query parameters for the county search endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct CountySearchQuery {
    /// Free text matched against "County Name, State"
    #[validate(length(min = 2, max = 100))]
    pub q: String,
    /// Maximum number of suggestions (default: 10)
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Counties present in the establishment dataset
    pub counties: usize,
    /// Entries in the county search list
    pub county_list: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::industries::get_industries,
        crate::handlers::counties::search_counties,
        crate::handlers::trend::get_trend,
    ),
    components(
        schemas(
            LookupApiResponse,
            CountyListApiResponse,
            IndustryListApiResponse,
            ErrorResponse,
            HealthResponse,
            CountySearchQuery,
            CountyDto,
            IndustryDto,
            LookupResponse,
            TrendSummary,
            TrendKind,
            ChartSeries,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "industries", description = "Industry catalogue endpoints"),
        (name = "counties", description = "County search endpoints"),
        (name = "trend", description = "Peak and trend analysis endpoints"),
    ),
    info(
        title = "Peak Business Calculator API",
        description = "Historical peak establishment counts per US county and industry, from Census County Business Patterns data",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
