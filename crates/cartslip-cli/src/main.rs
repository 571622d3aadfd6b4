//! CLI application for grocery invoice item extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, fragments, name, process, rows};

/// cartslip - Extract purchased items from grocery delivery invoices
#[derive(Parser)]
#[command(name = "cartslip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract items from a single invoice (PDF or fragment JSON)
    Process(process::ProcessArgs),

    /// Extract items from multiple invoices
    Batch(batch::BatchArgs),

    /// Dump the positioned text fragments of a PDF
    Fragments(fragments::FragmentsArgs),

    /// Show row clustering and column boundaries per page
    Rows(rows::RowsArgs),

    /// Parse package size and clean a product name
    Name(name::NameArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Fragments(args) => fragments::run(args, config_path).await,
        Commands::Rows(args) => rows::run(args, config_path).await,
        Commands::Name(args) => name::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
