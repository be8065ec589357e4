use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dynapath_core::{DynaPath, Traversal};

use crate::client::DEFAULT_API_URL;

/// Folder descent rules, as exposed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Look up every segment after a folder among the top-level entries
    Compatible,
    /// Look up segments inside the matched folder
    Nested,
}

impl From<TraversalMode> for Traversal {
    fn from(mode: TraversalMode) -> Self {
        match mode {
            TraversalMode::Compatible => Traversal::Compatible,
            TraversalMode::Nested => Traversal::Nested,
        }
    }
}

/// Configuration for the dynapath resolver.
#[derive(Parser, Debug, Clone)]
#[command(name = "dynapath")]
#[command(about = "Resolve a Dynalist `document/path:node/path` to the node it names")]
pub struct Config {
    /// Dynalist API token
    #[arg(long, env = "DYNALIST_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Dynalist API base URL
    #[arg(long, default_value = DEFAULT_API_URL, env = "DYNALIST_API_URL")]
    pub api_url: String,

    /// Per-request timeout (seconds)
    #[arg(long, default_value = "30", env = "DYNALIST_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Folder descent rules
    #[arg(long, value_enum, default_value_t = TraversalMode::Compatible)]
    pub traversal: TraversalMode,

    /// Fail when a segment matches nothing instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Path in canonical form: `folder/document:node/node`
    #[arg(value_parser = DynaPath::from_str)]
    pub path: DynaPath,

    /// Node segments appended after PATH
    pub nodes: Vec<String>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// PATH with every extra node segment appended.
    pub fn target_path(&self) -> DynaPath {
        self.nodes
            .iter()
            .fold(self.path.clone(), |path, node| path / node)
    }
}
