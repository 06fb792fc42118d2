use clap::Parser;
use invoicer::config::AppConfig;
use invoicer::server::ServerBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Invoice and expense record service
#[derive(Parser, Debug)]
#[command(name = "invoicer", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (host:port), overrides the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_yaml_file(&path.to_string_lossy())?,
        None => AppConfig::default(),
    };
    let mut config = config.with_env_overrides()?;
    if let Some(bind) = &cli.bind {
        config.set_bind_address(bind)?;
    }

    let addr = config.server.bind_address();
    ServerBuilder::from_config(&config)
        .await?
        .serve(&addr)
        .await
}
