use anyhow::Context;
use std::net::SocketAddr;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// This main function is the entry point when running `cargo run -p web-server`.
// The `vantage serve` subcommand is the full-featured way to start the same server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = configuration::load_config(Path::new("config.toml"))?;
    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address '{}'", config.server.addr))?;
    web_server::run_server(addr, config).await
}
