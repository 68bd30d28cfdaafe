//! CLI command implementations

pub mod create;
pub mod delete;
pub mod demo;
pub mod list;
pub mod open;

use std::fmt;
use std::path::PathBuf;

use agenda_core::config::Config;
use agenda_core::{AgendaContext, ServiceError};
use anyhow::{Context, Result};

use crate::output;

/// Get the agenda directory from environment or default
pub fn get_agenda_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AGENDA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".agenda"))
        .context("Could not find home directory (set AGENDA_DIR)")
}

/// Load the configuration from the agenda directory
pub fn load_config() -> Result<Config> {
    let agenda_dir = get_agenda_dir()?;
    Config::load(&agenda_dir)
        .with_context(|| format!("Failed to load settings from {:?}", agenda_dir))
}

/// Build a context from the stored configuration
pub fn get_context() -> Result<AgendaContext> {
    let config = load_config()?;
    AgendaContext::new(config).context("Failed to initialize agenda context")
}

/// Build a context and log in as `account`
pub fn get_session(account: &str) -> Result<AgendaContext> {
    let ctx = get_context()?;
    if !ctx.store.login(account) {
        anyhow::bail!("Origin account must be exactly 10 digits, got '{}'", account);
    }
    Ok(ctx)
}

/// Marks an error that has already been shown to the user as a toast
#[derive(Debug)]
pub struct Reported(String);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}", self.0)
    }
}

/// Whether `error` was already surfaced through [`report`]
pub fn is_reported(error: &anyhow::Error) -> bool {
    error.downcast_ref::<Reported>().is_some()
}

/// Surface a service failure the way a view would: as an error toast
pub fn report(ctx: &AgendaContext, action: &str, error: ServiceError) -> anyhow::Error {
    ctx.notifier.error(format!("Could not {}: {}", action, error), None);
    output::toast(&ctx.notifier.snapshot());
    anyhow::Error::new(error).context(Reported(action.to_string()))
}
