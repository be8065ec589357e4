// Shared modules (used by the `dynapath` binary and the integration tests)
pub mod backend;
pub mod client;
pub mod config;
pub mod report;
