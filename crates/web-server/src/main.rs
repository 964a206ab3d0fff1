use anyhow::Context;
use std::path::PathBuf;

// This main function is the entry point when running `cargo run -p web-server`.
// Reads `CREASE_CONFIG` (default `crease.toml`) and serves on the configured address.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var_os("CREASE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crease.toml"));
    let config = configuration::load_config(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    let _guard = configuration::init_tracing(&config.logging)?;

    web_server::run_server(&config, config.server.addr()).await
}
