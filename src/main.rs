use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use xswap::core::log::init_logging;

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

#[derive(Args)]
struct SwapCliArgs {
    /// Amount of the source currency
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// Source currency code (defaults to the configured one)
    #[arg(short, long)]
    from: Option<String>,

    /// Destination currency code (defaults to the configured one)
    #[arg(short, long)]
    to: Option<String>,
}

impl From<SwapCliArgs> for xswap::SwapArgs {
    fn from(args: SwapCliArgs) -> xswap::SwapArgs {
        xswap::SwapArgs {
            amount: args.amount,
            from: args.from,
            to: args.to,
        }
    }
}

impl From<Commands> for xswap::AppCommand {
    fn from(cmd: Commands) -> xswap::AppCommand {
        match cmd {
            Commands::Prices => xswap::AppCommand::Prices,
            Commands::Quote(args) => xswap::AppCommand::Quote(args.into()),
            Commands::Swap(args) => xswap::AppCommand::Swap(args.into()),
            Commands::Icon { currency } => xswap::AppCommand::Icon { currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the latest price of every currency
    Prices,
    /// Display the converted amount for a currency pair
    Quote(SwapCliArgs),
    /// Simulate a swap between two currencies
    Swap(SwapCliArgs),
    /// Display the icon URL for a currency
    Icon {
        /// Currency code
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xswap::cli::setup::setup(),
        Some(cmd) => xswap::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
