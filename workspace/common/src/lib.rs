//! Common transport-layer types shared between the backend, the CLI and the
//! frontend. These structs mirror the HTTP API payloads and the analysis
//! output so every consumer deserializes the same shapes.

pub mod headline;
mod ids;
mod industry;
mod trend;

pub use ids::{CountyFips, IdError, IndustryCode, Year};
pub use industry::{industry_name, display_name, Industry, INDUSTRIES};
pub use trend::{ChartSeries, TrendKind, TrendSummary, SPARSE_THRESHOLD};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    LookupApiResponse = ApiResponse<LookupResponse>,
    CountyListApiResponse = ApiResponse<Vec<CountyDto>>,
    IndustryListApiResponse = ApiResponse<Vec<IndustryDto>>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

// ===================== Counties =====================

/// County entry as shown in search suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CountyDto {
    #[schema(value_type = String, example = "42101")]
    pub fips: CountyFips,
    /// Display name, already including the state
    pub name: String,
    pub state: String,
}

// ===================== Industries =====================

/// Industry from the curated catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IndustryDto {
    #[schema(value_type = String, example = "5411")]
    pub code: IndustryCode,
    pub name: String,
}

impl From<&Industry> for IndustryDto {
    fn from(industry: &Industry) -> Self {
        Self {
            code: industry.code(),
            name: industry.name.to_string(),
        }
    }
}

// ===================== Lookup =====================

/// Result of looking up one (county, industry) pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LookupResponse {
    #[schema(value_type = String, example = "42101")]
    pub county_fips: CountyFips,
    pub county_name: String,
    pub industry: IndustryDto,
    pub summary: TrendSummary,
    pub chart: ChartSeries,
    /// Plain-text headline describing the peak and trend
    pub headline: String,
    /// Set when the series is too thin for confident interpretation
    pub data_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_is_never_successful() {
        let err = ErrorResponse::new("NO_COUNTY_DATA", "No data available for this county.");
        assert!(!err.success);
        assert_eq!(err.code, "NO_COUNTY_DATA");
    }

    #[test]
    fn test_county_dto_serializes_fips_as_string() {
        let dto = CountyDto {
            fips: "42101".parse().unwrap(),
            name: "Philadelphia County, Pennsylvania".to_string(),
            state: "PA".to_string(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["fips"], "42101");

        let back: CountyDto = serde_json::from_value(json).unwrap();
        assert_eq!(back, dto);
    }

    #[test]
    fn test_industry_dto_from_catalogue() {
        let dto = IndustryDto::from(&INDUSTRIES[1]);
        assert_eq!(dto.code.as_str(), "7225");
        assert_eq!(dto.name, "Restaurants");
    }
}
