//! Open command - resolve a view path through the navigation guard

use anyhow::Result;
use colored::Colorize;

use super::{get_context, get_session};

pub fn run(path: &str, account: Option<&str>) -> Result<()> {
    let mut ctx = match account {
        Some(account) => get_session(account)?,
        None => get_context()?,
    };

    let navigation = ctx.router.push(path)?;
    let location = &navigation.location;
    let name = location.name.as_deref().unwrap_or("(no view)");

    match &navigation.redirected_from {
        Some(from) => println!(
            "{} {} {} {}",
            from.dimmed(),
            "→".yellow(),
            location.path.bold(),
            format!("[{}]", name).dimmed()
        ),
        None => println!("{} {}", location.path.bold(), format!("[{}]", name).dimmed()),
    }

    Ok(())
}
