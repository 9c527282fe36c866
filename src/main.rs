use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use webs::cli::Args;
use webs::config::Config;
use webs::server;
use webs::site::Site;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = Config::load(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    let site = Arc::new(Site::new(cfg.root_dir()?, cfg.server.name.clone())?);
    let listener = server::listener::bind(&cfg).await?;
    println!("listening on {}", listener.local_addr()?);
    tracing::info!(root = %site.root().display(), "Serving directory");

    tokio::select! {
        res = server::listener::serve(listener, site) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
