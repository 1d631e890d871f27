pub mod discover;
pub mod statuses;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use compass_common::company::CompanyStatus;
use compass_common::config::Config;
use compass_common::query::{DEFAULT_DOMAIN, DEFAULT_LOCATION, Location, SearchQuery};

#[derive(Parser)]
#[command(name = "compass")]
#[command(version, about = "Discover companies and investment opportunities with AI.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output, repeat for less (-q, -qq)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never wait for key presses
    #[arg(long = "no-input", global = true)]
    pub disable_input: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Alternative API host, e.g. a proxy
    #[arg(long, global = true, env = "COMPASS_API_BASE")]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find companies in an industry around a location
    #[command(alias = "d")]
    Discover(DiscoverArgs),
    /// List the statuses accepted by --status
    #[command(alias = "s")]
    Statuses,
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// Company domain or industry, e.g. "AI in Healthcare"
    #[arg(short, long, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// City or coordinates, e.g. "San Francisco" or "40.7128, -74.0060"
    #[arg(short, long, default_value = DEFAULT_LOCATION, allow_hyphen_values = true)]
    pub location: String,

    /// Company status to include, repeatable
    #[arg(
        short,
        long = "status",
        default_value = "Proposed Investment",
        value_parser = CompanyStatus::parse_selectable
    )]
    pub statuses: Vec<CompanyStatus>,

    /// Use the larger model; slower but better on complex queries
    #[arg(long)]
    pub deep_search: bool,

    /// Load this many pages without prompting
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Write results as CSV into DIR (current directory if omitted)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub csv: Option<PathBuf>,

    /// Print results as JSON on stdout instead of a tree
    #[arg(long)]
    pub json: bool,
}

impl DiscoverArgs {
    pub fn to_query(&self) -> anyhow::Result<SearchQuery> {
        let location: Location = Location::from_input(&self.location);
        let mut statuses: Vec<CompanyStatus> = Vec::new();
        for status in &self.statuses {
            if !statuses.contains(status) {
                statuses.push(status.clone());
            }
        }

        Ok(SearchQuery::new(self.domain.trim(), location, statuses).with_deep_search(self.deep_search))
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            no_color: self.no_color,
            disable_input: self.disable_input,
        }
    }
}

impl ApiArgs {
    /// Resolves the key from the flag, `GEMINI_API_KEY`, or the legacy `API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("API_KEY").ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
