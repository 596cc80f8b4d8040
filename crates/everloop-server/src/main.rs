//! everloop server binary.
//!
//! Reads `everloop.toml` (or the path given with `--config`) overlaid by
//! `EVERLOOP_*` environment variables, builds an in-memory store, optionally
//! seeds it, and serves the JSON API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use everloop_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Everloop story engine server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "everloop.toml")]
  config: PathBuf,

  /// Start with an empty world even if `seed_world` is set.
  #[arg(long)]
  no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("EVERLOOP"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let engine = server_cfg.engine();
  if server_cfg.seed_world && !cli.no_seed {
    everloop_server::seed_world(&*engine)
      .await
      .context("failed to seed world")?;
  }

  let app = everloop_server::app(engine);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
