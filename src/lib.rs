pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

/// Currency selection and amount for a quote or swap.
#[derive(Debug, Clone)]
pub struct SwapArgs {
    pub amount: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Prices,
    Quote(SwapArgs),
    Swap(SwapArgs),
    Icon { currency: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xswap starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let feed = providers::HttpPriceFeed::new(
        &config.providers.prices.url,
        config.providers.prices.retries,
    );
    let icons = config.providers.icons.resolver();

    match command {
        AppCommand::Prices => cli::prices::run(&feed, &icons).await,
        AppCommand::Quote(args) => {
            let (from, to) = selection(&args, &config);
            let form = cli::swap::prepare_form(&feed, from, to, &args.amount).await;
            cli::quote::run(&form);
            Ok(())
        }
        AppCommand::Swap(args) => {
            let (from, to) = selection(&args, &config);
            let mut form = cli::swap::prepare_form(&feed, from, to, &args.amount).await;
            cli::swap::run(&mut form, config.swap.delay()).await?;
            Ok(())
        }
        AppCommand::Icon { currency } => {
            let resolver = providers::HttpIconResolver::new(icons);
            cli::icon::run(&resolver, &currency).await;
            Ok(())
        }
    }
}

fn selection<'a>(args: &'a SwapArgs, config: &'a AppConfig) -> (&'a str, &'a str) {
    (
        args.from.as_deref().unwrap_or(&config.swap.from),
        args.to.as_deref().unwrap_or(&config.swap.to),
    )
}
