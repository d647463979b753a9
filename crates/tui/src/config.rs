pub use tix_core::config::*;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> anyhow::Result<ApiConfig> {
    ApiConfig::resolve(cli.api_url.clone())
}
