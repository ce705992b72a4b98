use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use henhouse::model::HistoryAction;

mod cmd;

#[derive(Parser)]
#[command(name = "henhouse")]
#[command(version, about = "Poultry batch tracker")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip interactive prompts and use flag values or defaults
    #[arg(long, global = true)]
    pub yes: bool,

    /// Base URL of the farm API. Overrides HENHOUSE_API_URL and henhouse.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all batches with their egg totals
    #[command(alias = "list")]
    Batches,
    /// Show one batch with derived figures
    Show { id: i64 },
    /// Create a new batch
    Add {
        #[arg(long)]
        shed_no: Option<String>,
        #[arg(long)]
        opening_count: Option<String>,
        /// Age week (>= 1)
        #[arg(long, allow_hyphen_values = true)]
        week: Option<String>,
        /// Age day within the week (1-7)
        #[arg(long, allow_hyphen_values = true)]
        day: Option<String>,
    },
    /// Edit the daily counts of a batch
    Update {
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        mortality: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        culls: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        table: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        jumbo: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        cr: Option<String>,
    },
    /// Show the batch change history
    History {
        /// Only show CREATE, UPDATE or DELETE records
        #[arg(short, long)]
        action: Option<HistoryAction>,
    },
    /// Open the interactive shell at a route (/, /batches, /add-batch, /history)
    Open { route: String },
    /// Start the interactive shell
    Shell,
    /// View or create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default henhouse.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = henhouse::config::Config::new(project_dir, cli.api_url.clone(), cli.verbose)?;
    henhouse::logging::init(&config.log_directive());
    tracing::debug!(api_url = %config.api_url, source = %config.api_url_source, "configuration resolved");

    match &cli.command {
        Commands::Batches => cmd::cmd_batches(&config).await?,
        Commands::Show { id } => cmd::cmd_show(&config, *id).await?,
        Commands::Add {
            shed_no,
            opening_count,
            week,
            day,
        } => {
            let input = cmd::AddInput {
                shed_no: shed_no.clone(),
                opening_count: opening_count.clone(),
                week: week.clone(),
                day: day.clone(),
            };
            cmd::cmd_add(&config, input, cli.yes).await?
        }
        Commands::Update {
            id,
            mortality,
            culls,
            table,
            jumbo,
            cr,
        } => {
            let input = cmd::UpdateInput {
                mortality: mortality.clone(),
                culls: culls.clone(),
                table: table.clone(),
                jumbo: jumbo.clone(),
                cr: cr.clone(),
            };
            cmd::cmd_update(&config, *id, input, cli.yes).await?
        }
        Commands::History { action } => cmd::cmd_history(&config, action.clone()).await?,
        Commands::Open { route } => cmd::cmd_open(&config, route).await?,
        Commands::Shell => cmd::cmd_shell(&config).await?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
