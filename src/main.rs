use clap::Parser;
use colored::*;
use portfolio_feed::cli::{Cli, Command};
use portfolio_feed::feed::FeedService;
use portfolio_feed::github::GitHubClient;
use portfolio_feed::server::{start_server, AppState};
use portfolio_feed::showcase;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::new(cli.api_base_url.clone(), cli.token.clone())?;
    let feed = FeedService::new(client, cli.username.clone(), cli.strategy);

    match cli.command {
        Command::Serve { port } => {
            println!("{}", "Portfolio Repository Feed".bold().green());
            println!("{}\n", "=".repeat(50).dimmed());
            println!("👤 Account: {}", cli.username);
            println!("📌 Strategy: {}", feed.strategy());
            println!("\nPress Ctrl+C to stop the server\n");

            start_server(AppState::new(feed), port).await?;

            println!("✅ Server stopped");
        }
        Command::List => {
            let projects = match feed.fetch_summaries().await {
                Ok(projects) => showcase::select(projects),
                Err(e) => {
                    error!("Failed to load projects: {}", e);
                    eprintln!("{}", showcase::render_load_failure());
                    std::process::exit(1);
                }
            };

            if projects.is_empty() {
                println!("{}", showcase::render_empty());
            }
            for project in &projects {
                println!("{}", showcase::render_card(project));
            }
        }
    }

    Ok(())
}
