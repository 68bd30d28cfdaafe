//! Transient notification state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a toast message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the toast area should currently show.
///
/// After a dismissal `visible` goes false but `message` and `severity` keep
/// the last toast's content. Only `visible` is meaningful once hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl ToastState {
    /// Shown toast content, or `None` while hidden
    pub fn shown(&self) -> Option<(&str, Severity)> {
        self.visible.then_some((self.message.as_str(), self.severity))
    }
}
