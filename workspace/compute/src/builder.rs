//! Assembles `cbp_data.json` from Census County Business Patterns API
//! responses.
//!
//! The network side lives in the CLI; this module only knows the URL
//! layout, the response shape and how rows fold into a [`CbpDataset`].

use common::{CountyFips, IndustryCode, Year};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::dataset::CbpDataset;
use crate::error::{ComputeError, Result};

const CENSUS_API_BASE: &str = "https://api.census.gov/data";

/// Name of the NAICS query variable the Census API expects for `year`.
///
/// The API switched NAICS vintages over time; 2022 onwards still uses the
/// 2017 vintage.
pub fn naics_variable(year: Year) -> &'static str {
    match year.get() {
        1998..=2002 => "NAICS1997",
        2003..=2007 => "NAICS2002",
        2008..=2011 => "NAICS2007",
        2012..=2016 => "NAICS2012",
        _ => "NAICS2017",
    }
}

/// Establishment-count query for every county, one industry, one year.
pub fn census_url(year: Year, industry: &IndustryCode) -> String {
    format!(
        "{}/{}/cbp?get=ESTAB,NAME&for=county:*&{}={}",
        CENSUS_API_BASE,
        year,
        naics_variable(year),
        industry
    )
}

/// One county row of a Census CBP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusRow {
    pub fips: CountyFips,
    pub name: String,
    pub establishments: u32,
}

fn cell_str(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses a Census API payload: a JSON array of arrays whose first row is
/// the header and whose data rows are `[ESTAB, NAME, NAICS, state, county]`.
///
/// Rows with a missing, empty or non-integer `ESTAB` are skipped, as are
/// rows whose state/county codes do not form a valid FIPS code.
#[instrument(skip(payload))]
pub fn parse_census_rows(payload: &Value) -> Result<Vec<CensusRow>> {
    let rows = payload.as_array().ok_or_else(|| {
        ComputeError::CensusResponse("expected a JSON array of rows".to_string())
    })?;

    let mut parsed = Vec::new();
    for row in rows.iter().skip(1) {
        let Some(cells) = row.as_array() else {
            trace!("skipping non-array row");
            continue;
        };
        let Some(establishments) = cell_str(cells.first())
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| s.trim().parse::<u32>().ok())
        else {
            continue;
        };
        let name = cell_str(cells.get(1)).unwrap_or_default();
        let (Some(state), Some(county)) = (cell_str(cells.get(3)), cell_str(cells.get(4))) else {
            continue;
        };
        let Ok(fips) = CountyFips::from_parts(&state, &county) else {
            trace!(%state, %county, "skipping row with invalid FIPS parts");
            continue;
        };
        parsed.push(CensusRow {
            fips,
            name,
            establishments,
        });
    }
    debug!(rows = parsed.len(), "parsed census response");
    Ok(parsed)
}

/// Folds per-(year, industry) Census rows into a dataset.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    dataset: CbpDataset,
    rows_added: usize,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rows of one year and industry. A county's name is taken
    /// from the most recently added row naming it.
    pub fn add(&mut self, year: Year, industry: &IndustryCode, rows: &[CensusRow]) -> &mut Self {
        for row in rows {
            self.dataset.record(
                row.fips.clone(),
                &row.name,
                industry.clone(),
                year,
                row.establishments,
            );
        }
        self.rows_added += rows.len();
        self
    }

    pub fn rows_added(&self) -> usize {
        self.rows_added
    }

    pub fn build(self) -> CbpDataset {
        self.dataset
    }
}
