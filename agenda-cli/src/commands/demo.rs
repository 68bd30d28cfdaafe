//! Demo command - manage demo mode

use agenda_core::adapters::demo::DEMO_ACCOUNT;
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{get_agenda_dir, load_config};

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let agenda_dir = get_agenda_dir()?;
    std::fs::create_dir_all(&agenda_dir)?;
    let mut config = load_config()?;

    match command {
        Some(DemoCommands::On) => {
            config.enable_demo_mode();
            config.save(&agenda_dir)?;
            println!("{}", "Demo mode enabled".green());
            println!(
                "Transfers are served in memory. Try 'agenda list --account {}'.",
                DEMO_ACCOUNT
            );
            Ok(())
        }
        Some(DemoCommands::Off) => {
            config.disable_demo_mode();
            config.save(&agenda_dir)?;
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if config.demo_mode {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
                println!("{}", format!("Service: {}", config.client.base_url).dimmed());
            }
            Ok(())
        }
    }
}
