use common::{CountyFips, IdError};
use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// The series has no observations to analyze
    #[error("Observation series is empty")]
    EmptySeries,

    /// A county, industry or year key failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdError),

    /// An establishment count is negative or does not fit the count type
    #[error("Invalid establishment count {value} for {context}")]
    InvalidCount { context: String, value: i64 },

    /// Error from JSON parsing or writing
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A Census API payload does not have the expected shape
    #[error("Census response error: {0}")]
    CensusResponse(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

/// Errors surfaced to the user when a (county, industry) lookup fails.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Please select an industry.")]
    IndustryNotSelected,

    #[error("Please select a county from the dropdown.")]
    CountyNotSelected,

    #[error("No data available for this county.")]
    NoCountyData(CountyFips),

    #[error("No data available for {industry_name} in {county_name}.")]
    NoIndustryData {
        county_name: String,
        /// Lowercased display name
        industry_name: String,
    },

    #[error(transparent)]
    Analysis(#[from] ComputeError),
}

impl LookupError {
    /// Stable upper-snake code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::IndustryNotSelected => "INDUSTRY_NOT_SELECTED",
            LookupError::CountyNotSelected => "COUNTY_NOT_SELECTED",
            LookupError::NoCountyData(_) => "NO_COUNTY_DATA",
            LookupError::NoIndustryData { .. } => "NO_INDUSTRY_DATA",
            LookupError::Analysis(ComputeError::EmptySeries) => "EMPTY_SERIES",
            LookupError::Analysis(_) => "ANALYSIS_FAILED",
        }
    }
}
