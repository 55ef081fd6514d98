use compute::Tables;
use gloo_net::http::Request;
use std::ops::Deref;
use std::rc::Rc;

use crate::settings;

pub const CBP_DATA_FILE: &str = "cbp_data.json";
pub const COUNTY_LIST_FILE: &str = "county_list.json";

/// Message shown when either table fails to load
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please refresh the page.";

/// Fetches the raw bytes of one static table
async fn get_bytes(file: &str) -> Result<Vec<u8>, String> {
    let url = settings::get_settings().data_url(file);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", url, error_msg);
        error_msg
    })?;

    if !response.ok() {
        let error_msg = format!("HTTP error: {}", response.status());
        log::error!("GET {} - {}", url, error_msg);
        return Err(error_msg);
    }

    let bytes = response.binary().await.map_err(|e| {
        let error_msg = format!("Failed to read response: {}", e);
        log::error!("GET {} - {}", url, error_msg);
        error_msg
    })?;

    log::trace!("GET {} - {} bytes", url, bytes.len());
    Ok(bytes)
}

/// Loads both tables concurrently and validates them
pub async fn load_tables() -> Result<Tables, String> {
    let (cbp_data, county_list) =
        futures::try_join!(get_bytes(CBP_DATA_FILE), get_bytes(COUNTY_LIST_FILE))?;

    let tables = Tables::from_slices(&cbp_data, &county_list).map_err(|e| {
        log::error!("Invalid data tables: {}", e);
        e.to_string()
    })?;

    log::info!("Loaded {} counties with CBP data", tables.dataset.len());
    log::info!("Loaded {} counties for autocomplete", tables.counties.len());
    Ok(tables)
}

/// Loaded tables shared between components.
///
/// Compared by pointer so props only change when the tables are reloaded.
#[derive(Debug, Clone)]
pub struct SharedTables(pub Rc<Tables>);

impl PartialEq for SharedTables {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedTables {
    type Target = Tables;

    fn deref(&self) -> &Tables {
        &self.0
    }
}
