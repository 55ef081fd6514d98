//! The two static lookup tables: establishment counts per county and
//! industry (`cbp_data.json`) and the county list used for search
//! (`county_list.json`).
//!
//! Every key is validated while loading, so a malformed FIPS code, NAICS
//! code, year or count rejects the whole file instead of surfacing later as
//! a missing lookup.

use common::{CountyDto, CountyFips, IndustryCode, Year};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::series::ObservationSeries;

/// One county of the CBP dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyRecord {
    pub fips: CountyFips,
    pub name: String,
    industries: BTreeMap<IndustryCode, ObservationSeries>,
}

impl CountyRecord {
    pub fn new(fips: CountyFips, name: impl Into<String>) -> Self {
        Self {
            fips,
            name: name.into(),
            industries: BTreeMap::new(),
        }
    }

    pub fn series(&self, industry: &IndustryCode) -> Option<&ObservationSeries> {
        self.industries.get(industry)
    }

    pub fn industries(&self) -> impl Iterator<Item = &IndustryCode> + '_ {
        self.industries.keys()
    }

    pub fn insert_series(&mut self, industry: IndustryCode, series: ObservationSeries) {
        self.industries.insert(industry, series);
    }

    pub(crate) fn series_mut(&mut self, industry: IndustryCode) -> &mut ObservationSeries {
        self.industries.entry(industry).or_default()
    }
}

#[derive(Deserialize)]
struct RawCounty {
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    industries: BTreeMap<String, BTreeMap<String, i64>>,
}

/// Establishment counts keyed by county, then industry, then year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CbpDataset {
    counties: BTreeMap<CountyFips, CountyRecord>,
}

impl CbpDataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawCounty> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: BTreeMap<String, RawCounty> = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, RawCounty> = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    #[instrument(skip(raw), fields(counties = raw.len()))]
    fn from_raw(raw: BTreeMap<String, RawCounty>) -> Result<Self> {
        let mut counties = BTreeMap::new();
        for (raw_fips, raw_county) in raw {
            let fips = CountyFips::parse(&raw_fips).inspect_err(|e| {
                error!(error = %e, "rejecting CBP dataset");
            })?;
            let mut record = CountyRecord::new(fips.clone(), raw_county.name);
            for (raw_code, years) in raw_county.industries {
                let code = IndustryCode::parse(&raw_code).inspect_err(|e| {
                    error!(county = %fips, error = %e, "rejecting CBP dataset");
                })?;
                let context = format!("county {} industry {}", fips, code);
                let series = ObservationSeries::from_raw(
                    years.iter().map(|(year, value)| (year.as_str(), *value)),
                    &context,
                )?;
                record.insert_series(code, series);
            }
            counties.insert(fips, record);
        }
        info!("Loaded {} counties with CBP data", counties.len());
        Ok(Self { counties })
    }

    pub fn county(&self, fips: &CountyFips) -> Option<&CountyRecord> {
        self.counties.get(fips)
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    /// Records one observation, creating the county and series as needed.
    /// A non-empty `name` replaces the stored county name.
    pub(crate) fn record(
        &mut self,
        fips: CountyFips,
        name: &str,
        industry: IndustryCode,
        year: Year,
        value: u32,
    ) {
        let record = self
            .counties
            .entry(fips.clone())
            .or_insert_with(|| CountyRecord::new(fips, name));
        if !name.is_empty() {
            record.name = name.to_string();
        }
        record.series_mut(industry).insert(year, value);
    }

    /// JSON value in the `cbp_data.json` layout:
    /// `{"42101": {"name": "...", "5411": {"2012": 1234}}}`.
    pub fn to_json_value(&self) -> Value {
        let mut root = Map::new();
        for (fips, record) in &self.counties {
            let mut county = Map::new();
            county.insert("name".to_string(), Value::String(record.name.clone()));
            for (code, series) in &record.industries {
                let years: Map<String, Value> = series
                    .as_map()
                    .iter()
                    .map(|(year, value)| (year.to_string(), Value::from(*value)))
                    .collect();
                county.insert(code.to_string(), Value::Object(years));
            }
            root.insert(fips.to_string(), Value::Object(county));
        }
        Value::Object(root)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json_value())?)
    }
}

#[derive(Deserialize)]
struct RawCountyEntry {
    name: String,
    #[serde(default)]
    state: String,
    fips: String,
}

/// Counties offered by the search box, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountyList {
    entries: Vec<CountyDto>,
}

impl CountyList {
    pub fn new(entries: Vec<CountyDto>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawCountyEntry> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Vec<RawCountyEntry> = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: Vec<RawCountyEntry>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| -> Result<CountyDto> {
                let fips = CountyFips::parse(&entry.fips).inspect_err(|e| {
                    error!(index, name = %entry.name, error = %e, "rejecting county list");
                })?;
                Ok(CountyDto {
                    fips,
                    name: entry.name,
                    state: entry.state,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Loaded {} counties for autocomplete", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CountyDto] {
        &self.entries
    }

    pub fn find_by_fips(&self, fips: &CountyFips) -> Option<&CountyDto> {
        self.entries.iter().find(|entry| &entry.fips == fips)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
