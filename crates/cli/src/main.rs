//! Workview CLI — the main entry point.
//!
//! Commands:
//! - `gateway` — Start the RPC/WebSocket gateway server
//! - `list`    — List context files in the workspace
//! - `read`    — Print one context file
//! - `status`  — Show configuration and workspace status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "workview",
    about = "Workview — read-only context gateway for agent workspaces",
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
    /// Start the gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List context files in the workspace
    List {
        /// Workspace-relative directory (defaults to the root)
        path: Option<String>,

        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Print one context file
    Read {
        /// Workspace-relative file path
        path: String,

        /// Print the raw JSON payload instead of the content
        #[arg(long)]
        json: bool,
    },

    /// Show configuration and workspace status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
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
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::List { path, json } => commands::list::run(path, json).await?,
        Commands::Read { path, json } => commands::read::run(path, json).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
