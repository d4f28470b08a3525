use anyhow::Context;
use clap::Parser;
use shopatlas::dispatcher::Dispatcher;
use shopatlas::routes::RouteTableCache;
use shopatlas::runtime_config::{Mode, RuntimeConfig};
use shopatlas::server::{AppService, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ShopAtlas catch-all API server.
#[derive(Debug, Parser)]
#[command(name = "shopatlas", version, about)]
struct Cli {
    /// Root of the route directory tree.
    #[arg(long, default_value = "routes")]
    routes_dir: PathBuf,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: String,

    /// Development mode: rebuild the route table on every request.
    #[arg(long)]
    dev: bool,

    /// Verbose route diagnostics. Observability only.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = RuntimeConfig::from_env();
    if cli.dev {
        config.mode = Mode::Development;
    }
    if cli.debug {
        config.debug = true;
    }

    may::config().set_stack_size(config.stack_size);

    let routes = Arc::new(RouteTableCache::new(&cli.routes_dir, config.mode));
    routes.table().dump();

    let mut dispatcher = Dispatcher::new();
    // SAFETY: the may runtime is configured above and handlers reply at
    // most once per request.
    unsafe {
        shopatlas::registry::register_all(&mut dispatcher);
    }

    let service = AppService::new(routes, Arc::new(dispatcher), config);

    info!(
        addr = %cli.addr,
        routes_dir = %cli.routes_dir.display(),
        mode = ?config.mode,
        debug = config.debug,
        "shopatlas listening"
    );
    let handle = HttpServer(service)
        .start(&cli.addr)
        .with_context(|| format!("failed to bind {}", cli.addr))?;

    handle
        .join()
        .map_err(|err| anyhow::anyhow!("server failed: {err:?}"))?;
    Ok(())
}
