//! Agenda CLI - scheduled transfers from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{create, delete, demo, list, open};

/// Agenda - schedule transfers from your terminal
#[derive(Parser)]
#[command(name = "agenda", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scheduled transfers of an account
    List {
        /// Origin account (10 digits)
        #[arg(long, short, env = "AGENDA_ACCOUNT")]
        account: String,
        /// Page number, starting at 0
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size (defaults to the configured size)
        #[arg(long)]
        size: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Schedule a new transfer
    Create {
        /// Origin account (10 digits)
        #[arg(long, short, env = "AGENDA_ACCOUNT")]
        account: String,
        /// Destination account
        #[arg(long)]
        to: String,
        /// Amount to transfer
        #[arg(long)]
        amount: f64,
        /// Transfer date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Extra fields sent as-is, as key=value
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a scheduled transfer
    Delete {
        /// Origin account (10 digits)
        #[arg(long, short, env = "AGENDA_ACCOUNT")]
        account: String,
        /// Transfer ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show where navigating to a view would end up
    Open {
        /// View path, e.g. /agendamentos
        path: String,
        /// Log in with this account first
        #[arg(long, short, env = "AGENDA_ACCOUNT")]
        account: Option<String>,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // AGENDA_LOG takes precedence over RUST_LOG
    let filter = EnvFilter::try_from_env("AGENDA_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("agenda_core=warn,agenda=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if commands::is_reported(&e) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { account, page, size, json } => list::run(&account, page, size, json).await,
        Commands::Create { account, to, amount, date, fields, json } => {
            create::run(&account, &to, amount, &date, &fields, json).await
        }
        Commands::Delete { account, id, force } => delete::run(&account, &id, force).await,
        Commands::Open { path, account } => open::run(&path, account.as_deref()),
        Commands::Demo { command } => demo::run(command),
    }
}
