#[cfg(test)]
pub mod test_utils {
    use crate::config::{initialize_app_state, AppConfig, CBP_DATA_FILE, COUNTY_LIST_FILE};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Establishment counts for three counties.
    ///
    /// Philadelphia covers every trend kind: legal services declined,
    /// restaurants are growing, personal care is flat at its peak, book
    /// stores are sparse and banks started from zero.
    pub const CBP_DATA: &str = r#"{
        "42101": {
            "name": "Philadelphia County, Pennsylvania",
            "5411": {"2015": 10, "2016": 15, "2017": 12},
            "7225": {"2012": 2000, "2016": 2600, "2020": 2900},
            "8121": {"2018": 5, "2019": 8, "2020": 8},
            "4512": {"2010": 2, "2011": 4},
            "5221": {"2012": 0, "2013": 3},
            "4481": {}
        },
        "06037": {
            "name": "Los Angeles County, California",
            "5411": {"2012": 18000, "2016": 21000, "2023": 19500}
        },
        "48201": {
            "name": "",
            "7225": {"2012": 7000, "2023": 9500}
        }
    }"#;

    pub const COUNTY_LIST: &str = r#"[
        {"name": "Philadelphia County, PA", "state": "Pennsylvania", "fips": "42101"},
        {"name": "Los Angeles County, CA", "state": "California", "fips": "06037"},
        {"name": "Harris County, TX", "state": "Texas", "fips": "48201"},
        {"name": "Cook County, IL", "state": "Illinois", "fips": "17031"},
        {"name": "Lancaster County, PA", "state": "Pennsylvania", "fips": "42071"},
        {"name": "Lancaster County, NE", "state": "Nebraska", "fips": "31109"}
    ]"#;

    /// Writes the fixture tables into a fresh data directory
    pub fn write_fixture_tables() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join(CBP_DATA_FILE), CBP_DATA).expect("Failed to write cbp data");
        std::fs::write(dir.path().join(COUNTY_LIST_FILE), COUNTY_LIST)
            .expect("Failed to write county list");
        dir
    }

    /// Create AppState for testing, backed by the fixture tables.
    ///
    /// The returned directory must outlive the state.
    pub async fn setup_test_app_state() -> (AppState, TempDir) {
        let dir = write_fixture_tables();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            web_dir: dir.path().join("web"),
            ..AppConfig::default()
        };
        let state = initialize_app_state(&config)
            .await
            .expect("Failed to load fixture tables");
        (state, dir)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> (Router, TempDir) {
        let _guard = init_test_tracing();

        let (state, dir) = setup_test_app_state().await;
        let router = create_router(state);
        (router, dir)
    }
}
