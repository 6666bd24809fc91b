//! REM CLI - Command line tool for querying the housing market analytics API.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rem-cli",
    version,
    about = "Housing market analytics toolkit"
)]
struct Cli {
    /// API base URL
    #[arg(long, default_value = rem_cmd::DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: rem_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    rem_cmd::run(&cli.base_url, cli.command).await
}
