//! Resolve a Dynalist path and print the node it names.
//!
//! The document path is resolved against the account's file tree, then the
//! node path against that document's outline. Nothing is cached or written.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dynapath_core::{OutlineBackend, Resolver, Traversal};
use dynapath_dynalist::backend::DynalistBackend;
use dynapath_dynalist::client::DynalistClient;
use dynapath_dynalist::config::Config;
use dynapath_dynalist::report::NodeReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (stdout is reserved for the report)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let path = config.target_path();

    info!("Starting dynapath v{}", env!("CARGO_PKG_VERSION"));
    info!("  API: {}", config.api_url);
    info!("  Traversal: {:?}", config.traversal);
    info!("  Path: {}", path);

    let client = Arc::new(
        DynalistClient::new(&config.api_url, &config.token, config.timeout())
            .context("Failed to create HTTP client")?,
    );
    let backend: Arc<dyn OutlineBackend> = Arc::new(DynalistBackend::new(client));
    let resolver = Resolver::new(backend)
        .with_traversal(Traversal::from(config.traversal))
        .with_strict_segments(config.strict);

    let resolution = tokio::select! {
        result = resolver.resolve(&path) => {
            result.with_context(|| format!("Failed to resolve {}", path))?
        }
        _ = signal::ctrl_c() => {
            anyhow::bail!("Interrupted while resolving {}", path);
        }
    };

    match resolution {
        Some(resolution) => {
            let report = NodeReport::from(&resolution);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => warn!("Nothing found at {}", path),
    }

    Ok(())
}
