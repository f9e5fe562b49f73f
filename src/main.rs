use anyhow::Result;
use cambio::core::Currency;
use cambio::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cambio::AppCommand {
    fn from(cmd: Commands) -> cambio::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                swap,
            } => cambio::AppCommand::Convert {
                amount,
                from,
                to,
                swap,
            },
            Commands::Rates => cambio::AppCommand::Rates,
            Commands::Interactive => cambio::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; invalid input converts to 0.00
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        /// Source currency (BRL, USD, EUR, GBP)
        #[arg(short, long)]
        from: Option<Currency>,
        /// Target currency (BRL, USD, EUR, GBP)
        #[arg(short, long)]
        to: Option<Currency>,
        /// Exchange source and target currencies
        #[arg(short, long)]
        swap: bool,
    },
    /// Display exchange rates and a bar chart relative to BRL
    Rates,
    /// Start an interactive converter session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => cambio::cli::setup::setup(),
        Some(cmd) => cambio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
