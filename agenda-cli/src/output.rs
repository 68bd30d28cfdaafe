//! Output formatting utilities

use agenda_core::{ScheduledTransfer, Severity, ToastState, TransferPage};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

/// Fields shown as their own columns; everything else goes to "Details"
const COLUMNS: [(&str, &str); 3] = [
    ("contaDestino", "Destination"),
    ("valor", "Amount"),
    ("dataTransferencia", "Date"),
];

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Render the toast area, if anything is showing
pub fn toast(state: &ToastState) {
    let Some((message, severity)) = state.shown() else {
        return;
    };
    match severity {
        Severity::Success => println!("{} {}", "✓".green(), message.green()),
        Severity::Error => eprintln!("{} {}", "✗".red(), message.red()),
        Severity::Info => println!("{} {}", "ℹ".cyan(), message.cyan()),
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cell(transfer: &ScheduledTransfer, key: &str) -> String {
    match transfer.detail(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Table of the transfers on a page
pub fn transfer_table(page: &TransferPage) -> Table {
    let mut table = create_table();
    let mut header = vec!["ID"];
    header.extend(COLUMNS.iter().map(|(_, title)| *title));
    header.push("Details");
    table.set_header(header);

    for transfer in &page.items {
        let mut row = vec![transfer
            .id
            .as_ref()
            .map_or_else(|| "-".to_string(), |id| id.to_string())];
        row.extend(COLUMNS.iter().map(|(key, _)| cell(transfer, key)));

        let extra: Vec<String> = transfer
            .details
            .iter()
            .filter(|(key, _)| !COLUMNS.iter().any(|(column, _)| *column == key.as_str()))
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        row.push(extra.join(", "));

        table.add_row(row);
    }
    table
}

/// One-line pagination summary
pub fn pagination_line(page: &TransferPage) -> String {
    let p = page.pagination;
    format!(
        "Page {} of {} ({} transfers)",
        p.current_page.saturating_add(1),
        p.total_pages.max(1),
        p.total_elements
    )
}
