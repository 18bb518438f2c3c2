use anyhow::Result;
use clap::Parser;
use platform_obs::{ObsConfig, init_tracing};
use roster_client::{HttpEmployeeApi, api::DEFAULT_API_URL, shell};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Interactive employee grid")]
struct Cli {
    /// Employee collection endpoint of the roster API.
    #[arg(long, env = "ROSTER_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mut obs = ObsConfig::new("roster").with_env();
    obs.env_filter.get_or_insert_with(|| "warn".to_string());
    init_tracing(obs)?;

    let cli = Cli::parse();
    let api = HttpEmployeeApi::new(cli.api_url);
    info!(url = api.base_url(), "connecting to roster api");
    shell::run(&api).await
}
