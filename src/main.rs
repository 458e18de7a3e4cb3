use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

/// Gross/net salary calculator service.
///
/// Loads the rate tables from the configuration directory and serves the
/// salary API over HTTP.
#[derive(Debug, Parser)]
struct Cli {
    /// Directory containing a `rates/` folder of rate table YAML files.
    #[arg(long, default_value = "./config/vn")]
    config: String,

    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,
}

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)?;
    info!(
        config = %cli.config,
        tables = config.tables().len(),
        latest = %config.latest().effective_date,
        "Loaded rate tables"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!(bind = %cli.bind, "Salary engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
