pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConverterState, Currency};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: Option<String>,
        from: Option<Currency>,
        to: Option<Currency>,
        swap: bool,
    },
    Rates,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let hg = config.hgbrasil();
    let provider = providers::HgBrasilProvider::new(&hg.base_url, hg.key.as_deref());

    let defaults = &config.defaults;
    let mut state = ConverterState::new(&defaults.amount, defaults.from, defaults.to);

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            swap,
        } => {
            if let Some(amount) = amount {
                state.set_amount(&amount);
            }
            if let Some(from) = from {
                state.set_from(from);
            }
            if let Some(to) = to {
                state.set_to(to);
            }
            if swap {
                state.swap();
            }
            cli::convert::run(&mut state, &provider).await
        }
        AppCommand::Rates => cli::rates::run(&mut state, &provider).await,
        AppCommand::Interactive => cli::interactive::run(&mut state, &provider).await,
    }
}
