use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{analyze, build_dataset, search, serve};

#[derive(Parser)]
#[command(name = "peakbiz")]
#[command(about = "Peak Business Calculator: when did an industry peak in a US county?")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    ///
    /// Serves the JSON API, the static data tables under /data and the
    /// built frontend from the web directory.
    Serve {
        /// Directory holding cbp_data.json and county_list.json
        #[arg(short, long, env = "PEAKBIZ__DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Directory holding the built frontend
        #[arg(short, long, env = "PEAKBIZ__WEB_DIR")]
        web_dir: Option<PathBuf>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "PEAKBIZ__BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Analyze one county and industry and print the result
    ///
    /// Examples:
    ///   peakbiz analyze --county 42101 --industry 5411
    ///   peakbiz analyze --county 06037 --industry 4512 --json
    Analyze {
        /// 5-digit county FIPS code
        #[arg(short, long)]
        county: String,

        /// NAICS industry code
        #[arg(short, long)]
        industry: String,

        /// Directory holding cbp_data.json and county_list.json
        #[arg(short, long, env = "PEAKBIZ__DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search counties by name
    Search {
        /// At least two characters of "County Name, State"
        query: String,

        /// Maximum number of matches
        #[arg(short, long, default_value_t = compute::DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,

        /// Directory holding cbp_data.json and county_list.json
        #[arg(short, long, env = "PEAKBIZ__DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Download County Business Patterns data from the Census API
    ///
    /// Fetches every catalogue industry for each year in the range and
    /// writes raw/cbp_raw_data.json and cbp_data.json to the output
    /// directory.
    BuildDataset {
        /// Directory the dataset files are written to
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// First year to fetch
        #[arg(long, default_value_t = 2012)]
        start_year: u16,

        /// Last year to fetch (inclusive)
        #[arg(long, default_value_t = 2023)]
        end_year: u16,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_dir,
                web_dir,
                bind_address,
            } => {
                serve(data_dir, web_dir, bind_address).await?;
            }
            Commands::Analyze {
                county,
                industry,
                data_dir,
                json,
            } => {
                analyze(&county, &industry, data_dir, json).await?;
            }
            Commands::Search {
                query,
                limit,
                data_dir,
            } => {
                search(&query, limit, data_dir).await?;
            }
            Commands::BuildDataset {
                output_dir,
                start_year,
                end_year,
            } => {
                build_dataset(&output_dir, start_year, end_year).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_share_config_environment_names() {
        use clap::CommandFactory;
        let command = Cli::command();
        let env_of = |subcommand: &str, arg: &str| {
            command
                .find_subcommand(subcommand)
                .and_then(|sub| sub.get_arguments().find(|a| a.get_id() == arg))
                .and_then(|a| a.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };
        assert_eq!(env_of("serve", "data_dir").as_deref(), Some("PEAKBIZ__DATA_DIR"));
        assert_eq!(env_of("serve", "web_dir").as_deref(), Some("PEAKBIZ__WEB_DIR"));
        assert_eq!(env_of("serve", "bind_address").as_deref(), Some("PEAKBIZ__BIND_ADDRESS"));
        assert_eq!(env_of("analyze", "data_dir").as_deref(), Some("PEAKBIZ__DATA_DIR"));
        assert_eq!(env_of("search", "data_dir").as_deref(), Some("PEAKBIZ__DATA_DIR"));
    }

    #[test]
    fn test_build_dataset_defaults() {
        let cli = Cli::try_parse_from(["peakbiz", "build-dataset"]).unwrap();
        match cli.command {
            Commands::BuildDataset {
                output_dir,
                start_year,
                end_year,
            } => {
                assert_eq!(output_dir, PathBuf::from("data"));
                assert_eq!(start_year, 2012);
                assert_eq!(end_year, 2023);
            }
            _ => panic!("expected build-dataset"),
        }
    }

    #[test]
    fn test_analyze_requires_county_and_industry() {
        assert!(Cli::try_parse_from(["peakbiz", "analyze", "--county", "42101"]).is_err());
        let cli = Cli::try_parse_from([
            "peakbiz", "analyze", "--county", "42101", "--industry", "5411", "--json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Analyze { json: true, .. }));
    }
}
