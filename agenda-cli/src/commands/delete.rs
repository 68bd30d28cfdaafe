//! Delete command - remove a scheduled transfer

use agenda_core::TransferId;
use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::{get_session, report};
use crate::output;

pub async fn run(account: &str, id: &str, force: bool) -> Result<()> {
    let ctx = get_session(account)?;

    if !force {
        println!("\n{}", format!("This will delete scheduled transfer {}.", id).yellow());
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    if let Err(e) = ctx.store.delete_transfer(&TransferId::new(id)).await {
        return Err(report(&ctx, "delete the transfer", e));
    }

    ctx.notifier.success(format!("Transfer {} deleted", id), None);
    output::toast(&ctx.notifier.snapshot());
    Ok(())
}
