//! CLI command implementations

pub mod plan;
pub mod project;

pub use plan::PlanArgs;
pub use project::ProjectArgs;

use bamboo_api::BambooClient;
use bamboo_core::{Config, Secrets};

/// Build a client for the configured server
fn get_client(config: &Config) -> anyhow::Result<BambooClient> {
    let secrets = Secrets::load_with_overrides()?;
    Ok(BambooClient::from_config(config, &secrets)?)
}
