// In crates/core-types/src/alert.rs

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Phrase emitted by the charting indicator when a new trade setup prints.
pub const NEW_TRADE_PHRASE: &str = "New Trade Design";
/// Phrase emitted when the indicator signals the position should be flattened.
pub const EXIT_PHRASE: &str = "Exit Signal";

/// Field names searched, in order, for the alert text in structured bodies.
pub const MESSAGE_FIELDS: [&str; 5] = ["message", "text", "alert", "content", "body"];

/// An inbound alert, alive for a single handling cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The human-readable alert text.
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            received_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> AlertKind {
        AlertKind::classify(&self.message)
    }

    pub fn details(&self) -> AlertDetails {
        AlertDetails::parse(&self.message, self.kind())
    }
}

/// The classification of an alert. First match wins, case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    NewTrade,
    Exit,
    Unrecognized,
}

impl AlertKind {
    pub fn classify(message: &str) -> Self {
        if message.contains(NEW_TRADE_PHRASE) {
            AlertKind::NewTrade
        } else if message.contains(EXIT_PHRASE) {
            AlertKind::Exit
        } else {
            AlertKind::Unrecognized
        }
    }

    pub fn phrase(&self) -> Option<&'static str> {
        match self {
            AlertKind::NewTrade => Some(NEW_TRADE_PHRASE),
            AlertKind::Exit => Some(EXIT_PHRASE),
            AlertKind::Unrecognized => None,
        }
    }
}

/// Ticker and price quoted by the alert text, e.g.
/// `MNQZ2025 New Trade Design , Price = 25787.50`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertDetails {
    pub ticker: Option<String>,
    pub price: Option<f64>,
}

impl AlertDetails {
    pub fn parse(message: &str, kind: AlertKind) -> Self {
        let Some(phrase) = kind.phrase() else {
            return Self::default();
        };
        let Some(at) = message.find(phrase) else {
            return Self::default();
        };

        let ticker = parse_ticker(&message[..at]);
        // The entry alert always separates the price with a comma; the exit alert may not.
        let comma_required = kind == AlertKind::NewTrade;
        let price = parse_price(&message[at + phrase.len()..], comma_required);

        Self { ticker, price }
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

fn parse_ticker(before: &str) -> Option<String> {
    // The ticker must be separated from the phrase by whitespace.
    if !before.ends_with(char::is_whitespace) {
        return None;
    }
    let token = before.trim_end().rsplit(char::is_whitespace).next()?;
    let start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ticker_char(*c))
        .last()
        .map(|(i, _)| i)?;
    Some(token[start..].to_string())
}

fn parse_price(after: &str, comma_required: bool) -> Option<f64> {
    let rest = after.trim_start();
    let rest = match rest.strip_prefix(',') {
        Some(rest) => rest,
        None if comma_required => return None,
        None => rest,
    };
    let rest = rest.trim_start().strip_prefix("Price")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// The raw inbound webhook body, tagged by the shape it arrived in.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertPayload {
    Text(String),
    Json(Value),
    Form(Vec<(String, String)>),
}

impl AlertPayload {
    /// Tags a raw body using its `Content-Type` header and, failing that, its content.
    pub fn detect(content_type: Option<&str>, body: &[u8]) -> Self {
        let content_type = content_type.unwrap_or_default().to_ascii_lowercase();

        if content_type.contains("application/x-www-form-urlencoded") {
            let fields = url::form_urlencoded::parse(body).into_owned().collect();
            return AlertPayload::Form(fields);
        }

        let text = String::from_utf8_lossy(body).into_owned();
        let trimmed = text.trim_start();
        if content_type.contains("json") || trimmed.starts_with('{') || trimmed.starts_with('"') {
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                return AlertPayload::Json(value);
            }
        }

        AlertPayload::Text(text)
    }

    /// Extracts the human-readable alert text.
    pub fn message(&self) -> Result<String> {
        match self {
            AlertPayload::Text(text) => Ok(text.clone()),
            AlertPayload::Json(Value::String(text)) => Ok(text.clone()),
            AlertPayload::Json(Value::Object(map)) => {
                for field in MESSAGE_FIELDS {
                    if let Some(value) = map.get(field) {
                        return value.as_str().map(str::to_string).ok_or_else(|| {
                            Error::InvalidField {
                                field: field.to_string(),
                            }
                        });
                    }
                }
                Err(missing_message())
            }
            AlertPayload::Json(other) => Err(Error::UnsupportedPayload(format!(
                "expected a JSON object or string, got {}",
                json_kind(other)
            ))),
            AlertPayload::Form(fields) => MESSAGE_FIELDS
                .iter()
                .find_map(|name| fields.iter().find(|(key, _)| key == *name))
                .map(|(_, value)| value.clone())
                .ok_or_else(missing_message),
        }
    }
}

fn missing_message() -> Error {
    Error::MissingMessage {
        expected: MESSAGE_FIELDS.join(", "),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
