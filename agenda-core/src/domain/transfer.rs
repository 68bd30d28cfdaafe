//! Scheduled transfer domain model
//!
//! The service owns the shape of a scheduled transfer. The core only needs
//! its identifier and origin account; every other field is carried through
//! untouched in `details`.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

/// Wire name of the origin account field
pub const ORIGIN_ACCOUNT_FIELD: &str = "contaOrigem";

/// Identifier of a scheduled transfer.
///
/// The service may send a number or a string. Identity is the textual
/// form, but a numeric id is written back as the same number.
#[derive(Debug, Clone)]
pub struct TransferId {
    text: String,
    number: Option<Number>,
}

impl TransferId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            number: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Read an id from its wire value
    fn from_json(value: JsonValue) -> std::result::Result<Self, String> {
        match value {
            JsonValue::Number(n) => Ok(Self {
                text: n.to_string(),
                number: Some(n),
            }),
            JsonValue::String(s) => Ok(Self::new(s)),
            other => Err(format!("expected number or string for id, got {}", other)),
        }
    }
}

impl PartialEq for TransferId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TransferId {}

impl Hash for TransferId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for TransferId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for TransferId {
    fn from(id: u64) -> Self {
        Self {
            text: id.to_string(),
            number: Some(Number::from(id)),
        }
    }
}

impl Serialize for TransferId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.number {
            Some(n) => n.serialize(serializer),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for TransferId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json(value).map_err(D::Error::custom)
    }
}

/// A scheduled transfer as returned by the service.
///
/// Decoding never fails on `contaOrigem`: a string becomes `origin_account`,
/// any other value stays in `details` as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, JsonValue>")]
pub struct ScheduledTransfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TransferId>,
    #[serde(rename = "contaOrigem", skip_serializing_if = "Option::is_none")]
    pub origin_account: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

impl TryFrom<Map<String, JsonValue>> for ScheduledTransfer {
    type Error = String;

    fn try_from(mut details: Map<String, JsonValue>) -> std::result::Result<Self, String> {
        let id = match details.remove("id") {
            None | Some(JsonValue::Null) => None,
            Some(value) => Some(TransferId::from_json(value)?),
        };
        let origin_account = match details.remove(ORIGIN_ACCOUNT_FIELD) {
            Some(JsonValue::String(account)) => Some(account),
            Some(other) => {
                details.insert(ORIGIN_ACCOUNT_FIELD.to_string(), other);
                None
            }
            None => None,
        };
        Ok(Self {
            id,
            origin_account,
            details,
        })
    }
}

impl ScheduledTransfer {
    /// Look up a service-defined field
    pub fn detail(&self, key: &str) -> Option<&JsonValue> {
        self.details.get(key)
    }
}

/// Payload submitted to create a scheduled transfer.
///
/// `origin_account` is always overwritten by the store with the session's
/// account before submission; whatever the caller put there is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferDraft {
    #[serde(rename = "contaOrigem", default)]
    pub origin_account: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

impl TransferDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a service-defined field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let key = key.into();
        let value: JsonValue = value.into();
        if key == ORIGIN_ACCOUNT_FIELD {
            self.origin_account = value.as_str().map(str::to_string);
        } else {
            self.details.insert(key, value);
        }
        self
    }

    /// Build a draft from an arbitrary JSON object
    pub fn from_json(value: JsonValue) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Copy of this draft debited from `account` (or from nobody, when logged out)
    pub fn stamped(&self, account: Option<&str>) -> Self {
        Self {
            origin_account: account.map(str::to_string),
            details: self.details.clone(),
        }
    }
}

/// Pagination metadata of the current transfer page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32, total_elements: u64) -> Self {
        Self {
            current_page,
            total_pages,
            total_elements,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

/// The page of scheduled transfers currently held by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPage {
    pub items: Vec<ScheduledTransfer>,
    pub pagination: Pagination,
}

impl TransferPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
