use anyhow::Result;
use clap::{Parser, Subcommand};

use buyback::cli::{
    handle_estimate_command, handle_history_command, handle_sell_command, EstimateArgs,
    SellCommands,
};
use buyback::config::{BuybackPaths, Settings};

#[derive(Parser)]
#[command(
    name = "buyback",
    version,
    about = "Sell a used device through a step-by-step buyback wizard",
    long_about = "buyback walks you through listing a used device for buyback: pick the \
                  device, describe it, choose delivery, verify your identity, accept \
                  the offer and submit. Progress is saved between runs."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sell wizard commands
    #[command(subcommand)]
    Sell(SellCommands),

    /// Estimate an offer without starting the wizard
    Estimate(EstimateArgs),

    /// Show recent wizard activity
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BuybackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Sell(cmd)) => {
            paths.ensure_directories()?;
            handle_sell_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Estimate(args)) => {
            handle_estimate_command(&settings, args)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&paths, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing buyback-cli at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'buyback sell status' to start listing a device.");
        }
        Some(Commands::Config) => {
            println!("buyback-cli Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Progress file:    {}", paths.progress_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Audit enabled:    {}", settings.audit_enabled);
            println!(
                "  Price table:      {}",
                settings.pricing.price_table_url.as_deref().unwrap_or("(built-in prices)")
            );
            println!("  Fallback base:    {}", settings.pricing.fallback_base_price);
            println!(
                "  Submission sink:  {:?}{}",
                settings.submission.sink,
                settings
                    .submission
                    .endpoint
                    .as_deref()
                    .map(|e| format!(" ({})", e))
                    .unwrap_or_default()
            );
        }
        None => {
            println!("buyback - sell a used device");
            println!();
            println!("Run 'buyback --help' for usage information.");
            println!("Run 'buyback sell status' to see where you left off.");
        }
    }

    Ok(())
}
