//! CLI administration tool for the redirector.
//!
//! Talks to the configured store directly, without going through the HTTP
//! API. Reads the same environment as the server.
//!
//! # Usage
//!
//! ```bash
//! # Create a redirect
//! cargo run --bin redirector-admin -- create https://example.com --expires-in 3600
//!
//! # List all redirects with visit counts
//! cargo run --bin redirector-admin -- list
//!
//! # Show the visit counter of one fragment
//! cargo run --bin redirector-admin -- visits 000000001
//!
//! # Show which counter value a fragment was minted from
//! cargo run --bin redirector-admin -- decode 00000000A
//!
//! # Check store connectivity
//! cargo run --bin redirector-admin -- ping
//! ```

use redirector::config;
use redirector::server::connect_store;
use redirector::state::DynRedirectService;
use redirector::utils::fragment::decode_fragment;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing redirects.
#[derive(Parser)]
#[command(name = "redirector-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a redirect
    Create {
        /// Destination URL
        url: String,

        /// Advisory expiry in seconds (stored nowhere, echoed only)
        #[arg(short, long, default_value_t = 0)]
        expires_in: i64,
    },

    /// List all redirects
    List,

    /// Show the visit counter of a fragment
    Visits {
        fragment: String,
    },

    /// Show the counter value a fragment was minted from
    Decode {
        fragment: String,
    },

    /// Check store connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { fragment } => decode(&fragment),
        command => run_against_store(command).await,
    }
}

/// Connects to the configured store and dispatches a store-backed command.
async fn run_against_store(command: Commands) -> Result<()> {
    let config = config::load_from_env().context("Invalid configuration")?;
    let repository = connect_store(&config).await?;
    let service = DynRedirectService::new(repository, config.public_url.clone());

    match command {
        Commands::Create { url, expires_in } => create(&service, url, expires_in).await,
        Commands::List => list(&service).await,
        Commands::Visits { fragment } => visits(&service, &fragment).await,
        Commands::Ping => ping(&service).await,
        Commands::Decode { fragment } => decode(&fragment),
    }
}

async fn create(service: &DynRedirectService, url: String, expires_in: i64) -> Result<()> {
    let entry = service.create(url, expires_in).await?;

    println!("{}", "Redirect created".green().bold());
    println!("  {} {}", "Fragment:".bold(), entry.fragment.cyan());
    println!("  {} {}", "Short URL:".bold(), entry.url);
    println!("  {} {}", "Original:".bold(), entry.original_url);
    println!("  {} {}", "Expires in:".bold(), entry.expires_in);

    Ok(())
}

/// Prints every redirect with its visit counter, sorted by fragment.
async fn list(service: &DynRedirectService) -> Result<()> {
    let mut entries = service.list_all().await?;

    if entries.is_empty() {
        println!("{}", "No redirects".yellow());
        return Ok(());
    }

    entries.sort_by(|a, b| {
        a.fragment
            .len()
            .cmp(&b.fragment.len())
            .then_with(|| a.fragment.cmp(&b.fragment))
    });

    println!("{}", format!("{} redirect(s)", entries.len()).bright_blue().bold());
    println!();

    for entry in entries {
        let visits = service.visit_count(&entry.fragment).await?;
        println!(
            "  {}  {:>8}  {}",
            entry.fragment.cyan(),
            visits.to_string().bold(),
            entry.original_url
        );
    }

    Ok(())
}

async fn visits(service: &DynRedirectService, fragment: &str) -> Result<()> {
    let count = service.visit_count(fragment).await?;
    println!("{} {}", fragment.cyan(), count.to_string().bold());
    Ok(())
}

fn decode(fragment: &str) -> Result<()> {
    match decode_fragment(fragment) {
        Some(counter) => {
            println!("{} {}", fragment.cyan(), counter.to_string().bold());
            Ok(())
        }
        None => anyhow::bail!("'{}' is not a valid fragment", fragment),
    }
}

async fn ping(service: &DynRedirectService) -> Result<()> {
    if service.health_check().await {
        println!("{}", "Store reachable".green());
        Ok(())
    } else {
        anyhow::bail!("Store unreachable")
    }
}
