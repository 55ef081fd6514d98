use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::Year;

/// Peak values below this are flagged as sparse data.
pub const SPARSE_THRESHOLD: u32 = 10;

/// Relationship between the peak year and the most recent year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    /// Latest year is the peak and shows net growth since the first year
    Growing,
    /// Latest count equals the historical maximum without net growth, or
    /// ties an earlier peak year
    AtPeakFlat,
    /// Count has fallen since the peak year
    Declined,
    /// Latest year is the peak and the first year had no establishments,
    /// so no growth percentage exists
    NewEstablishments,
}

impl TrendKind {
    pub fn is_at_peak(self) -> bool {
        !matches!(self, TrendKind::Declined)
    }
}

/// Peak and trend summary of one observation series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrendSummary {
    #[schema(value_type = u16, example = 2016)]
    pub peak_year: Year,
    pub peak_value: u32,
    #[schema(value_type = u16, example = 2015)]
    pub first_year: Year,
    pub first_value: u32,
    #[schema(value_type = u16, example = 2017)]
    pub current_year: Year,
    pub current_value: u32,
    pub trend: TrendKind,
    /// `current - peak` when declined, `current - first` when growing, zero
    /// when flat at the peak
    pub change: i64,
    /// Signed percentage, rounded half away from zero. `None` for
    /// [`TrendKind::NewEstablishments`].
    pub percent_change: Option<i64>,
    /// True when the peak value is below [`SPARSE_THRESHOLD`]
    pub sparse: bool,
    pub observations: usize,
}

/// Series prepared for the chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    /// Year labels, ascending
    pub labels: Vec<String>,
    /// Establishment counts aligned with `labels`
    pub values: Vec<u32>,
    /// Index of the peak year within `labels`
    pub peak_index: usize,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn peak_label(&self) -> Option<&str> {
        self.labels.get(self.peak_index).map(String::as_str)
    }
}
