use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use ghprofile::api::create_router;
use ghprofile::config::CONFIG;
use ghprofile::data_models::SortReposBy;
use ghprofile::presenter::render_text;
use ghprofile::search::ProfileSearch;

#[derive(Parser)]
#[command(name = "ghprofile", about = "Show a GitHub user's profile and most recent repositories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up one user and print the report
    Show {
        username: String,
        /// Timestamp that decides recency
        #[arg(long, value_enum)]
        sort: Option<SortReposBy>,
        /// How many repositories to list
        #[arg(long)]
        count: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let search = ProfileSearch::from_config(&CONFIG)?;

    match cli.command {
        Command::Show {
            username,
            sort,
            count,
            json,
        } => {
            let sort = sort.unwrap_or(search.sort_by());
            let count = count.unwrap_or(search.count());
            match search.load_user_profile_with(&username, sort, count).await {
                Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
                Ok(report) => print!("{}", render_text(&report)),
                Err(e) => {
                    let message = e.user_message();
                    log::error!("{:#}", anyhow::Error::from(e));
                    eprintln!("{message}");
                    std::process::exit(1);
                }
            }
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| CONFIG.server_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, create_router(Arc::new(search)))
                .await
                .context("Server error")?;
        }
    }
    Ok(())
}
