use std::path::PathBuf;

use anyhow::Context;
use gurobi_server::{ClassifierServer, ServerConfig};

pub struct ServeArgs {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolve config (file, then env, then flags) and run until Ctrl-C.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    ClassifierServer::new(config)
        .start()
        .await
        .context("classifier server failed")
}

pub(crate) fn resolve_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let base = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    let mut config = base.apply_env()?;

    if let Some(host) = args.host {
        config.bind_address = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing::debug!(?config, "resolved server config");
    Ok(config)
}
