//! Toska Control - CLI client for the Toska chatbot daemon
//!
//! Talks to toskad over HTTP: menu listing/search, chat questions, menu
//! inserts and daemon health.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "toskactl")]
#[command(about = "Toska restaurant chatbot - command line client", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon address (also TOSKAD_ADDR env var)
    #[arg(long)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the full menu
    Menu,

    /// Search menu items by name substring
    Search {
        /// Substring to match against item names
        query: String,
    },

    /// Ask the chatbot a question
    Ask {
        /// The question, as you would type it in the chat page
        question: String,
    },

    /// Add a menu item
    Add {
        #[arg(long)]
        name: String,

        /// Whole-unit price
        #[arg(long)]
        price: i64,

        #[arg(long)]
        description: String,
    },

    /// Show daemon health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::DaemonClient::new(cli.addr.as_deref());

    match cli.command {
        Commands::Menu => commands::menu(&client).await,
        Commands::Search { query } => commands::search(&client, &query).await,
        Commands::Ask { question } => commands::ask(&client, &question).await,
        Commands::Add {
            name,
            price,
            description,
        } => commands::add(&client, &name, price, &description).await,
        Commands::Health => commands::health(&client).await,
    }
}
