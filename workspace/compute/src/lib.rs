pub mod builder;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod search;
pub mod series;
pub mod trend;

pub use dataset::{CbpDataset, CountyList, CountyRecord};
pub use error::{ComputeError, LookupError, Result};
pub use lookup::{handle_request, lookup, resolve_county, Lookup, LookupRequest};
pub use search::{CountyIndex, DEFAULT_SUGGESTION_LIMIT, MIN_QUERY_LEN};
pub use series::ObservationSeries;
pub use trend::{analyze, chart_series};

/// Both static tables, validated and ready for lookups.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub dataset: CbpDataset,
    pub counties: CountyIndex,
}

impl Tables {
    /// Parses the raw bytes of `cbp_data.json` and `county_list.json`.
    pub fn from_slices(cbp_data: &[u8], county_list: &[u8]) -> Result<Self> {
        let dataset = CbpDataset::from_slice(cbp_data)?;
        let counties = CountyIndex::new(CountyList::from_slice(county_list)?);
        Ok(Self { dataset, counties })
    }

    pub fn lookup(
        &self,
        county: &common::CountyFips,
        industry: &common::IndustryCode,
    ) -> std::result::Result<Lookup, LookupError> {
        lookup::lookup(&self.dataset, county, industry)
    }

    pub fn handle_request(&self, request: &LookupRequest) -> std::result::Result<Lookup, LookupError> {
        lookup::handle_request(&self.dataset, &self.counties, request)
    }
}
