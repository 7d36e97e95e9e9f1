use clap::{Parser, Subcommand};
use engine::{CategoryFilter, SortBy, TypeFilter};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    pub state_path: String,
    pub level: String,
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            username: String::new(),
            state_path: crate::local_state::default_state_path().to_string(),
            level: "info".to_string(),
            currency_symbol: "$".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fintrack", about = "Personal finance tracker")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL of the REST store (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the local state file.
    #[arg(long)]
    state: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in against the store's user list (password is prompted).
    Login {
        #[arg(long)]
        username: Option<String>,
    },
    /// Forget the session and the saved filters.
    Logout,
    /// Show whether a session is active.
    Status,
    /// Total income, expenses and balance.
    Balance,
    /// Totals by category and month with the leading groups.
    Report {
        /// Print the raw report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Manage operations.
    #[command(subcommand)]
    Operations(OperationsCommand),
    /// Manage categories.
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Inspect or reset the saved operation filter.
    #[command(subcommand)]
    Filter(FilterCommand),
}

#[derive(Debug, Subcommand)]
pub enum OperationsCommand {
    /// List operations; given options are merged into the saved filter.
    List {
        /// all, income or expense.
        #[arg(long = "type")]
        kind: Option<TypeFilter>,
        /// Category id or `all`.
        #[arg(long)]
        category: Option<CategoryFilter>,
        /// recent, less-recent, higher-amount, lower-amount, a-z or z-a.
        #[arg(long)]
        sort: Option<SortBy>,
    },
    Add(OperationArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: OperationArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct OperationArgs {
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub amount: String,
    /// income or expense.
    #[arg(long = "type")]
    pub kind: String,
    /// Category id.
    #[arg(long)]
    pub category: String,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    List,
    Add { name: String },
    Edit { id: String, name: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum FilterCommand {
    Show,
    Reset,
}

pub fn load() -> Result<(AppConfig, Command)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(state) = args.state {
        settings.state_path = state;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok((settings, args.command))
}
