//! CLI application for turning lodging receipts into draft expenses.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process};

/// Draft expense records from lodging receipts (PDF or image)
#[derive(Parser)]
#[command(name = "tripdraft")]
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
    /// Draft an expense from a single receipt file
    Process(process::ProcessArgs),

    /// Draft expenses from multiple receipt files
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
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

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
            Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
            Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
        }
    });

    // Ingestion abandoned by a timeout may still occupy a blocking thread;
    // exit without waiting for it.
    runtime.shutdown_background();

    result
}
