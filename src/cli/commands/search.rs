use anyhow::{bail, Result};
use compute::MIN_QUERY_LEN;
use std::path::PathBuf;
use tracing::{debug, trace};

use crate::config::{load_tables, AppConfig};

pub async fn search(query: &str, limit: usize, data_dir: Option<PathBuf>) -> Result<()> {
    trace!("Entering search function");

    if query.trim().chars().count() < MIN_QUERY_LEN {
        bail!("Search query must be at least {} characters", MIN_QUERY_LEN);
    }

    let config = AppConfig::load()?.with_overrides(data_dir, None, None);
    let tables = load_tables(&config).await?;

    let matches = tables.counties.search(query, limit);
    debug!("Found {} counties matching {:?}", matches.len(), query);

    if matches.is_empty() {
        println!("No counties found");
        return Ok(());
    }
    for county in matches {
        println!("{}  {}", county.fips, county.name);
    }
    Ok(())
}
