//! List command - show a page of scheduled transfers

use agenda_core::Pagination;
use anyhow::Result;
use colored::Colorize;

use super::{get_session, report};
use crate::output;

pub async fn run(account: &str, page: u32, size: Option<u32>, json: bool) -> Result<()> {
    let ctx = get_session(account)?;
    let size = size.unwrap_or(ctx.config.page_size);

    if let Err(e) = ctx.store.fetch_transfers(page, size).await {
        return Err(report(&ctx, "load scheduled transfers", e));
    }
    let current = ctx.store.page();

    if json {
        println!("{}", serde_json::to_string_pretty(&current)?);
        return Ok(());
    }

    println!("{}", format!("Scheduled transfers for {}", account).bold());
    println!();

    if current.is_empty() {
        output::info("No scheduled transfers");
        return Ok(());
    }

    println!("{}", output::transfer_table(&current));
    println!("{}", output::pagination_line(&current).dimmed());
    if let Some(hint) = next_page_hint(account, &current.pagination) {
        println!("{}", hint.dimmed());
    }

    Ok(())
}

/// Command line that fetches the page after `pagination`, if there is one
fn next_page_hint(account: &str, pagination: &Pagination) -> Option<String> {
    pagination.has_next().then(|| {
        format!(
            "Next page: agenda list --account {} --page {}",
            account,
            pagination.current_page.saturating_add(1)
        )
    })
}
