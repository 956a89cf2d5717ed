use anyhow::Context;
use vs_config::SummaryConfig;

use crate::cli::Cli;

/// Load layered config, then apply command-line overrides on top.
pub fn load_config(cli: &Cli) -> anyhow::Result<SummaryConfig> {
    let mut config = SummaryConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut SummaryConfig, cli: &Cli) {
    if let Some(url) = &cli.database {
        config.database.url.clone_from(url);
    }
    if let Some(variant) = cli.variant {
        config.output.variant = variant;
    }
    if let Some(rank) = &cli.rank {
        config.kb.rank.clone_from(rank);
    }
    tracing::debug!(
        database = %config.database.url,
        variant = %config.output.variant.as_str(),
        rank = %config.kb.rank,
        "effective configuration"
    );
}
