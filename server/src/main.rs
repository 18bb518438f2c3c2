use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_db::{DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use server::{
    config::AppConfig,
    http::{self, AppState, ServeConfig},
    setup,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roster-server", version, about = "Employee roster API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Create the employees table if it is missing.
    Setup {
        #[arg(long, help = "Insert sample employees when the table is empty")]
        seed: bool,
    },
    /// Insert sample employees into an empty table.
    Seed,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
    #[arg(long, help = "Create the employees table before serving if it is missing")]
    provision: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::new("roster-server").with_env())?;
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Setup { seed } => {
            let pool = setup_pool(&config).await?;
            setup::provision(&pool, seed).await.map(|_| ())
        }
        Command::Seed => {
            let pool = setup_pool(&config).await?;
            setup::seed_samples(&pool).await.map(|_| ())
        }
    }
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    connect(&config.database).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: AppConfig) -> Result<()> {
    let pool = setup_pool(&config).await?;
    if cmd.provision {
        setup::provision(&pool, false).await?;
    } else {
        ensure_table(&pool).await?;
    }
    let state = AppState::new(pool, config);
    http::serve((&cmd).into(), state).await
}

async fn ensure_table(pool: &DbPool) -> Result<()> {
    let total = platform_db::employee_count(pool).await.context(
        "employees table unavailable; run `roster-server setup` or pass --provision",
    )?;
    info!(total, "employees table reachable");
    Ok(())
}
