use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use a2a_relay::{A2aClient, AgentCard, Config};

/// a2a-relay - discover and message remote A2A agents
#[derive(Parser, Debug)]
#[command(name = "a2a-relay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Remote agent endpoint, in addition to the configured ones (repeatable)
    #[arg(short, long = "agent")]
    agents: Vec<String>,

    /// Total request timeout in seconds (overrides the configured value)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered remote agents and their advertised skills
    List,
    /// Send a text message to a remote agent and print the reply
    Send {
        /// Endpoint URL of the target agent
        url: String,
        /// Message text to deliver
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .init();

    // Load .env files (local first, then home directory)
    // Errors are ignored - files are optional
    let _ = dotenvy::from_filename(".env");
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".env"));
    }

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let timeout_secs = args.timeout.unwrap_or(config.client.request_timeout_secs);
    let client = A2aClient::with_timeout(Duration::from_secs(timeout_secs))?;

    for url in config.agents.endpoints.iter().chain(args.agents.iter()) {
        client.register(url);
    }

    match args.command {
        Command::List => {
            let cards = client.list_agents().await;
            if cards.is_empty() {
                println!("No remote agents available.");
                return Ok(());
            }
            for card in cards {
                match serde_json::from_value::<AgentCard>(card.clone()) {
                    Ok(card) => print_card(&card),
                    // A reachable agent with a nonconforming card is still
                    // worth showing
                    Err(_) => println!("{}", serde_json::to_string_pretty(&card)?),
                }
            }
        }
        Command::Send { url, message } => {
            let reply = client.dispatch(&url, &message).await?;
            println!("{}", reply);
        }
    }

    Ok(())
}

fn print_card(card: &AgentCard) {
    if card.version.is_empty() {
        println!("{}", card.name);
    } else {
        println!("{} v{}", card.name, card.version);
    }
    if !card.description.is_empty() {
        println!("  {}", card.description);
    }
    for skill in &card.skills {
        println!("  - {}: {}", skill.name, skill.description);
    }
}
