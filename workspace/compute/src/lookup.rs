//! Resolves a user's (county, industry) selection to a series and analyzes
//! it.

use common::{
    display_name, headline, ChartSeries, CountyFips, IndustryCode, IndustryDto, LookupResponse,
    TrendSummary,
};
use tracing::{debug, instrument, warn};

use crate::dataset::CbpDataset;
use crate::error::LookupError;
use crate::search::CountyIndex;
use crate::trend::{analyze, chart_series};

/// Fallback when the dataset has no name for a county.
const UNNAMED_COUNTY: &str = "this county";

/// What the user entered in the search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupRequest {
    pub industry: Option<IndustryCode>,
    /// County picked from the suggestions, if any
    pub selected_county: Option<CountyFips>,
    /// Raw text of the county input
    pub county_text: String,
}

/// Analysis of one (county, industry) pair, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub county_fips: CountyFips,
    pub county_name: String,
    pub industry: IndustryCode,
    pub industry_name: String,
    pub summary: TrendSummary,
    pub chart: ChartSeries,
}

impl Lookup {
    pub fn headline(&self) -> String {
        headline::headline(&self.industry_name, &self.county_name, &self.summary)
    }

    pub fn data_note(&self) -> Option<&'static str> {
        headline::data_note(&self.summary)
    }

    pub fn into_response(self) -> LookupResponse {
        let headline = self.headline();
        let data_note = self.data_note().map(str::to_string);
        LookupResponse {
            county_fips: self.county_fips,
            county_name: self.county_name,
            industry: IndustryDto {
                code: self.industry,
                name: self.industry_name,
            },
            summary: self.summary,
            chart: self.chart,
            headline,
            data_note,
        }
    }
}

/// Picks the county for a search: the selected suggestion when present,
/// otherwise an exact (case-insensitive) match of the typed name.
pub fn resolve_county(
    index: &CountyIndex,
    selected: Option<&CountyFips>,
    typed: &str,
) -> Result<CountyFips, LookupError> {
    if let Some(fips) = selected {
        return Ok(fips.clone());
    }
    index
        .resolve_exact(typed)
        .map(|county| county.fips.clone())
        .ok_or(LookupError::CountyNotSelected)
}

/// Looks up and analyzes the series of `industry` in `county`.
#[instrument(skip_all, fields(county = %county, industry = %industry))]
pub fn lookup(
    dataset: &CbpDataset,
    county: &CountyFips,
    industry: &IndustryCode,
) -> Result<Lookup, LookupError> {
    let record = dataset.county(county).ok_or_else(|| {
        warn!("no CBP data for county");
        LookupError::NoCountyData(county.clone())
    })?;

    let county_name = if record.name.is_empty() {
        UNNAMED_COUNTY.to_string()
    } else {
        record.name.clone()
    };
    let industry_name = display_name(industry);

    let series = match record.series(industry) {
        Some(series) if !series.is_empty() => series,
        _ => {
            warn!("no observations for industry in county");
            return Err(LookupError::NoIndustryData {
                county_name,
                industry_name: industry_name.to_lowercase(),
            });
        }
    };

    let summary = analyze(series)?;
    let chart = chart_series(series, &summary);
    debug!(peak_year = %summary.peak_year, trend = ?summary.trend, "lookup complete");

    Ok(Lookup {
        county_fips: county.clone(),
        county_name,
        industry: industry.clone(),
        industry_name,
        summary,
        chart,
    })
}

/// Runs a full search-form request: validates the selection, resolves the
/// county and analyzes its series.
pub fn handle_request(
    dataset: &CbpDataset,
    index: &CountyIndex,
    request: &LookupRequest,
) -> Result<Lookup, LookupError> {
    let industry = request
        .industry
        .as_ref()
        .ok_or(LookupError::IndustryNotSelected)?;
    let county = resolve_county(index, request.selected_county.as_ref(), &request.county_text)?;
    lookup(dataset, &county, industry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountyList;
    use common::TrendKind;

    const CBP_JSON: &str = r#"{
        "42101": {
            "name": "Philadelphia County, Pennsylvania",
            "4512": {"2015": 10, "2016": 15, "2017": 12},
            "5221": {}
        },
        "17031": {
            "name": "",
            "7225": {"2010": 2, "2011": 4}
        }
    }"#;

    const COUNTY_JSON: &str = r#"[
        {"name": "Philadelphia County, PA", "state": "Pennsylvania", "fips": "42_101"},
        {"name": "Cook County, IL", "state": "Illinois", "fips": "17031"},
        {"name": "Kent County, DE", "state": "Delaware", "fips": "10001"}
    ]"#;

    fn fixtures() -> (CbpDataset, CountyIndex) {
        let dataset = CbpDataset::from_json_str(CBP_JSON).unwrap();
        let index = CountyIndex::new(CountyList::from_json_str(COUNTY_JSON).unwrap());
        (dataset, index)
    }

    fn fips(s: &str) -> CountyFips {
        CountyFips::parse(s).unwrap()
    }

    fn code(s: &str) -> IndustryCode {
        IndustryCode::parse(s).unwrap()
    }

    #[test]
    fn test_lookup_declined_book_stores() {
        let (dataset, _) = fixtures();
        let result = lookup(&dataset, &fips("42101"), &code("4512")).unwrap();
        assert_eq!(result.industry_name, "Book stores");
        assert_eq!(result.summary.trend, TrendKind::Declined);
        assert_eq!(result.chart.peak_index, 1);
        assert_eq!(
            result.headline(),
            "Book stores in Philadelphia County, Pennsylvania peaked in 2016 with 15 establishments. Today: 12 (-20%)"
        );
        assert_eq!(result.data_note(), None);
    }

    #[test]
    fn test_missing_county() {
        let (dataset, _) = fixtures();
        let err = lookup(&dataset, &fips("10001"), &code("4512")).unwrap_err();
        assert!(matches!(err, LookupError::NoCountyData(_)));
        assert_eq!(err.to_string(), "No data available for this county.");
        assert_eq!(err.code(), "NO_COUNTY_DATA");
    }

    #[test]
    fn test_missing_or_empty_industry() {
        let (dataset, _) = fixtures();
        let err = lookup(&dataset, &fips("42101"), &code("7225")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No data available for restaurants in Philadelphia County, Pennsylvania."
        );

        let err = lookup(&dataset, &fips("42101"), &code("5221")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No data available for banks in Philadelphia County, Pennsylvania."
        );
    }

    #[test]
    fn test_unnamed_county_fallback() {
        let (dataset, _) = fixtures();
        let result = lookup(&dataset, &fips("17031"), &code("7225")).unwrap();
        assert_eq!(result.county_name, "this county");
        assert_eq!(result.summary.trend, TrendKind::Growing);
        assert!(result.data_note().is_some());
    }

    #[test]
    fn test_resolve_county_prefers_selection() {
        let (_, index) = fixtures();
        let chosen = resolve_county(&index, Some(&fips("17031")), "Philadelphia County, PA").unwrap();
        assert_eq!(chosen, fips("17031"));

        let typed = resolve_county(&index, None, "philadelphia county, pa").unwrap();
        assert_eq!(typed, fips("42101"));

        let err = resolve_county(&index, None, "Philadelphia").unwrap_err();
        assert!(matches!(err, LookupError::CountyNotSelected));
    }

    #[test]
    fn test_handle_request_requires_industry() {
        let (dataset, index) = fixtures();
        let request = LookupRequest {
            industry: None,
            selected_county: Some(fips("42101")),
            county_text: String::new(),
        };
        let err = handle_request(&dataset, &index, &request).unwrap_err();
        assert_eq!(err.to_string(), "Please select an industry.");
    }

    #[test]
    fn test_handle_request_by_typed_name() {
        let (dataset, index) = fixtures();
        let request = LookupRequest {
            industry: Some(code("4512")),
            selected_county: None,
            county_text: "Philadelphia County, PA".to_string(),
        };
        let result = handle_request(&dataset, &index, &request).unwrap();
        assert_eq!(result.county_fips, fips("42101"));
    }

    #[test]
    fn test_into_response_carries_text() {
        let (dataset, _) = fixtures();
        let response = lookup(&dataset, &fips("17031"), &code("7225"))
            .unwrap()
            .into_response();
        assert_eq!(response.industry.name, "Restaurants");
        assert!(response.headline.contains("up 100% since 2010"));
        assert_eq!(
            response.data_note.as_deref(),
            Some("Note: Limited data for this industry in this county.")
        );
    }
}
