use anyhow::Result;
use compute::Tables;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::schemas::AppState;

pub const CBP_DATA_FILE: &str = "cbp_data.json";
pub const COUNTY_LIST_FILE: &str = "county_list.json";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_WEB_DIR: &str = "web";

/// Errors raised while loading configuration or the static tables
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data tables: {0}")]
    Tables(#[from] compute::ComputeError),
}

/// Application configuration
///
/// Read from `PEAKBIZ__*` environment variables (after loading `.env`), e.g.
/// `PEAKBIZ__DATA_DIR=/srv/peakbiz/data`. Command-line flags override it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Bind address for the web server (IP:PORT)
    pub bind_address: String,
    /// Directory holding `cbp_data.json` and `county_list.json`
    pub data_dir: PathBuf,
    /// Directory holding the built frontend
    pub web_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            web_dir: PathBuf::from(DEFAULT_WEB_DIR),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults and environment variables
    pub fn load() -> Result<Self, StartupError> {
        dotenvy::dotenv().ok();
        Self::from_environment(config::Environment::with_prefix("PEAKBIZ").separator("__"))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, StartupError> {
        let config = config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("web_dir", DEFAULT_WEB_DIR)?
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        web_dir: Option<PathBuf>,
        bind_address: Option<String>,
    ) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        if let Some(web_dir) = web_dir {
            self.web_dir = web_dir;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn cbp_data_path(&self) -> PathBuf {
        self.data_dir.join(CBP_DATA_FILE)
    }

    pub fn county_list_path(&self) -> PathBuf {
        self.data_dir.join(COUNTY_LIST_FILE)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, StartupError> {
    tokio::fs::read(path).await.map_err(|source| StartupError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads both tables concurrently and validates them
#[instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
pub async fn load_tables(config: &AppConfig) -> Result<Tables, StartupError> {
    let cbp_path = config.cbp_data_path();
    let county_path = config.county_list_path();
    debug!("Reading {} and {}", cbp_path.display(), county_path.display());

    let (cbp_bytes, county_bytes) = tokio::try_join!(read_file(&cbp_path), read_file(&county_path))?;
    let tables = Tables::from_slices(&cbp_bytes, &county_bytes)?;

    info!(
        counties = tables.dataset.len(),
        county_list = tables.counties.len(),
        "Static tables loaded"
    );
    Ok(tables)
}

/// Initialize application state from configuration
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let tables = load_tables(config).await?;
    Ok(AppState {
        tables: Arc::new(tables),
        data_dir: config.data_dir.clone(),
        web_dir: config.web_dir.clone(),
    })
}
