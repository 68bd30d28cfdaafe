//! Create command - schedule a new transfer

use agenda_core::TransferDraft;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::{get_session, report};
use crate::output;

/// Parse a `key=value` pair; values that parse as JSON keep their type
fn parse_field(raw: &str) -> Result<(String, JsonValue)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Field name is empty in '{}'", raw);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub async fn run(
    account: &str,
    to: &str,
    amount: f64,
    date: &str,
    fields: &[String],
    json: bool,
) -> Result<()> {
    let mut draft = TransferDraft::new()
        .with("contaDestino", to)
        .with("valor", amount)
        .with("dataTransferencia", date);
    for raw in fields {
        let (key, value) = parse_field(raw)?;
        draft = draft.with(key, value);
    }

    let ctx = get_session(account)?;
    let created = match ctx.store.create_transfer(draft).await {
        Ok(created) => created,
        Err(e) => return Err(report(&ctx, "schedule the transfer", e)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    let id = created
        .id
        .as_ref()
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    ctx.notifier.success(format!("Transfer {} scheduled", id), None);
    output::toast(&ctx.notifier.snapshot());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_keeps_json_types() {
        assert_eq!(parse_field("taxa=3.5").unwrap(), ("taxa".to_string(), json!(3.5)));
        assert_eq!(parse_field("urgent=true").unwrap(), ("urgent".to_string(), json!(true)));
        assert_eq!(
            parse_field("memo=rent march").unwrap(),
            ("memo".to_string(), json!("rent march"))
        );
    }

    #[test]
    fn test_parse_field_rejects_malformed() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=1").is_err());
    }
}
