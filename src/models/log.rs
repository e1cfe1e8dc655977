use serde::{Deserialize, Serialize};

/// Severity/category of one streamed log line. The backend emits these as
/// lowercase strings; `payment` and `transaction` are the settlement-specific
/// levels the dashboard colors differently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Payment,
    Transaction,
}

impl LogLevel {
    /// CSS class suffix used by the terminal panel.
    pub fn as_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Payment => "payment",
            LogLevel::Transaction => "transaction",
        }
    }
}

/// One log line pushed over the stream. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub agent: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Details worth rendering: a `Some` that is a non-empty object.
    /// The backend sends `details: {}` for most lines.
    pub fn has_details(&self) -> bool {
        match &self.details {
            Some(serde_json::Value::Object(map)) => !map.is_empty(),
            Some(serde_json::Value::Null) | None => false,
            Some(_) => true,
        }
    }

    /// Indented JSON for the terminal panel, when there is anything to show.
    pub fn pretty_details(&self) -> Option<String> {
        if !self.has_details() {
            return None;
        }
        self.details
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
    }
}
