//! Concierge CLI — the main entry point.
//!
//! Commands:
//! - `chat`   — Interactive conversation or single-message mode
//! - `doctor` — Show resolved configuration and diagnose problems

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "concierge",
    about = "Concierge — a tool-calling assistant for meetings, portfolios and feedback",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// User identity to key durable records by
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show resolved configuration and diagnose problems
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message, user } => commands::chat::run(message, user).await?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
