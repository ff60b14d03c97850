use clap::{Parser, Subcommand};
use url::Url;

use crate::feed::StrategyChoice;
use crate::github::API_BASE_URL;

#[derive(Parser)]
#[command(name = "portfolio-feed")]
#[command(about = "Portfolio Feed - Serves a GitHub account's showcased repositories as JSON")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub account whose repositories are shown
    #[arg(long, env = "GITHUB_USERNAME", default_value = "Atee-Rawat")]
    pub username: String,

    /// GitHub token, required by the pinned strategy
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Upstream strategy
    #[arg(long, env = "FEED_STRATEGY", value_enum, default_value_t = StrategyChoice::Auto)]
    pub strategy: StrategyChoice,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_base_url: Url,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the repository feed over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Fetch the feed once and print it as project cards
    List,
}
