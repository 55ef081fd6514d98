use anyhow::{Context, Result};
use common::{headline::format_count, CountyFips, IndustryCode};
use std::path::PathBuf;
use tracing::{error, info, trace};

use crate::config::{load_tables, AppConfig};

pub async fn analyze(
    county: &str,
    industry: &str,
    data_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    trace!("Entering analyze function");

    let fips = CountyFips::parse(county).with_context(|| format!("Invalid county {:?}", county))?;
    let code =
        IndustryCode::parse(industry).with_context(|| format!("Invalid industry {:?}", industry))?;

    let config = AppConfig::load()?.with_overrides(data_dir, None, None);
    let tables = load_tables(&config).await?;

    let lookup = match tables.lookup(&fips, &code) {
        Ok(lookup) => lookup,
        Err(e) => {
            error!("Lookup failed for {}/{}: {}", fips, code, e);
            return Err(e.into());
        }
    };
    info!(county = %fips, industry = %code, trend = ?lookup.summary.trend, "Trend computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&lookup.into_response())?);
        return Ok(());
    }

    println!("{}", lookup.headline());
    if let Some(note) = lookup.data_note() {
        println!("{}", note);
    }
    println!();
    let chart = &lookup.chart;
    for (i, (label, value)) in chart.labels.iter().zip(&chart.values).enumerate() {
        let marker = if i == chart.peak_index { "  <- peak" } else { "" };
        println!("{}  {:>8}{}", label, format_count(*value), marker);
    }
    Ok(())
}
