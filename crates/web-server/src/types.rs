// In crates/web-server/src/types.rs

use engine::Outcome;
use serde::{Deserialize, Serialize};

/// The acknowledgment returned to the charting platform for every alert.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AckResponse {
    pub ok: bool,
    /// "buy", "sell", "exit", "hold" or "ignored".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ema: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downstream_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

impl From<&Outcome> for AckResponse {
    fn from(outcome: &Outcome) -> Self {
        let mut ack = AckResponse {
            ok: true,
            event: Some(outcome.event().to_string()),
            ..Default::default()
        };
        match outcome {
            Outcome::Dispatched { instruction, receipt, assessment } => {
                ack.ticker = Some(instruction.ticker.clone());
                ack.downstream_status = receipt.status;
                if let Some(assessment) = assessment {
                    ack.close = Some(assessment.close);
                    ack.ema = Some(assessment.ema);
                }
            }
            Outcome::Held { assessment } => {
                ack.close = Some(assessment.close);
                ack.ema = Some(assessment.ema);
            }
            Outcome::Ignored => {}
        }
        ack
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}
