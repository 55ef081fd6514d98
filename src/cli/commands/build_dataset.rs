use anyhow::{bail, Context, Result};
use common::{IndustryCode, Year, INDUSTRIES};
use compute::builder::{census_url, parse_census_rows, CensusRow, DatasetBuilder};
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::CBP_DATA_FILE;

const USER_AGENT: &str = "PeakBusinessCalculator/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_PAUSE: Duration = Duration::from_millis(500);
const RAW_DIR: &str = "raw";
const RAW_DATA_FILE: &str = "cbp_raw_data.json";

pub async fn build_dataset(output_dir: &Path, start_year: u16, end_year: u16) -> Result<()> {
    trace!("Entering build_dataset function");

    let years = year_range(start_year, end_year)?;
    info!(
        "Downloading County Business Patterns {}-{} for {} industries",
        start_year,
        end_year,
        INDUSTRIES.len()
    );

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let mut builder = DatasetBuilder::new();
    let mut raw = RawData::default();

    for year in years {
        info!("Downloading {}", year);
        for industry in INDUSTRIES {
            let code = industry.code();
            let rows = fetch_rows(&client, year, &code).await;
            info!("  NAICS {} ({}): {} counties", code, industry.name, rows.len());

            raw.insert(year, &code, &rows);
            builder.add(year, &code, &rows);

            tokio::time::sleep(REQUEST_PAUSE).await;
        }
    }

    let raw_dir = output_dir.join(RAW_DIR);
    tokio::fs::create_dir_all(&raw_dir)
        .await
        .with_context(|| format!("Failed to create {}", raw_dir.display()))?;

    let raw_path = raw_dir.join(RAW_DATA_FILE);
    tokio::fs::write(&raw_path, serde_json::to_vec(&raw.into_value())?)
        .await
        .with_context(|| format!("Failed to write {}", raw_path.display()))?;
    info!("Raw data saved to {}", raw_path.display());

    debug!("Assembled dataset from {} rows", builder.rows_added());
    let dataset = builder.build();
    let output_path = output_dir.join(CBP_DATA_FILE);
    tokio::fs::write(&output_path, dataset.to_json_string()?)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Processed data saved to {}", output_path.display());
    info!("Total counties: {}", dataset.len());
    Ok(())
}

fn year_range(start_year: u16, end_year: u16) -> Result<Vec<Year>> {
    if start_year > end_year {
        bail!("Start year {} is after end year {}", start_year, end_year);
    }
    (start_year..=end_year)
        .map(|y| Year::new(y).with_context(|| format!("Invalid year {}", y)))
        .collect()
}

/// Fetches one year and industry. Any failure yields no rows.
#[instrument(skip(client))]
async fn fetch_rows(client: &Client, year: Year, industry: &IndustryCode) -> Vec<CensusRow> {
    let url = census_url(year, industry);
    trace!("GET {}", url);

    let payload = match client.get(&url).send().await {
        Ok(response) => match response.error_for_status() {
            Ok(response) => response.json::<Value>().await,
            Err(e) => {
                warn!("Error fetching {} / {}: {}", year, industry, e);
                return Vec::new();
            }
        },
        Err(e) => {
            warn!("Error fetching {} / {}: {}", year, industry, e);
            return Vec::new();
        }
    };

    match payload {
        Ok(payload) => parse_census_rows(&payload).unwrap_or_else(|e| {
            warn!("Unexpected response for {} / {}: {}", year, industry, e);
            Vec::new()
        }),
        Err(e) => {
            warn!("JSON error for {} / {}: {}", year, industry, e);
            Vec::new()
        }
    }
}

/// Downloaded rows as `{year: {naics: [[fips, name, estab], ...]}}`
#[derive(Debug, Default)]
struct RawData {
    years: Map<String, Value>,
}

impl RawData {
    fn insert(&mut self, year: Year, industry: &IndustryCode, rows: &[CensusRow]) {
        let rows: Vec<Value> = rows
            .iter()
            .map(|row| json!([row.fips.as_str(), row.name, row.establishments]))
            .collect();
        let by_industry = self
            .years
            .entry(year.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(by_industry) = by_industry {
            by_industry.insert(industry.to_string(), Value::Array(rows));
        }
    }

    fn into_value(self) -> Value {
        Value::Object(self.years)
    }
}
