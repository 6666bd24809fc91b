//! Command implementations for the housing market CLI.
//!
//! Thin terminal client over the same REST surface the dashboard uses:
//! quick overview/ranking/trend/search queries plus a CSV export of the
//! national city-price table.

use clap::Subcommand;

pub mod national;

/// Base URL used when `--base-url` is not given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable the bearer token is read from.
pub const TOKEN_ENV: &str = "REM_TOKEN";

#[derive(Subcommand)]
pub enum Command {
    /// National overview: averages, extremes, listing volume
    Overview,

    /// City ranking (price / change / rent_ratio)
    Ranking {
        /// Ranking kind
        #[arg(short = 't', long, default_value = "price")]
        rank_type: String,

        /// Number of entries
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: u32,
    },

    /// Monthly price trend for a city (empty city = national average)
    Trend {
        /// City name
        #[arg(short, long, default_value = "")]
        city: String,

        /// Restrict to one year; 2026 adds prediction lines
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Search cities by keyword
    Search {
        /// City or province keyword
        keyword: String,
    },

    /// Export the national city-price table to CSV
    ExportCities {
        /// Output CSV path
        #[arg(short, long)]
        output: String,

        /// Only include one province
        #[arg(long)]
        province: Option<String>,
    },
}

pub async fn run(base_url: &str, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Overview => national::run_overview(base_url).await,
        Command::Ranking { rank_type, limit } => {
            national::run_ranking(base_url, &rank_type, limit).await
        }
        Command::Trend { city, year } => national::run_trend(base_url, &city, year).await,
        Command::Search { keyword } => national::run_search(base_url, &keyword).await,
        Command::ExportCities { output, province } => {
            national::run_export_cities(base_url, &output, province.as_deref()).await
        }
    }
}
