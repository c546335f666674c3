// In crates/execution/src/webhook.rs

use crate::{DispatchReceipt, Error, Executor, Result};
use api_client::{OrderPayload, WebhookClient};
use async_trait::async_trait;
use core_types::TradingInstruction;

/// An executor that posts real orders to the order-execution webhook.
#[derive(Debug, Clone)]
pub struct WebhookExecutor {
    /// The HTTP client for the webhook.
    client: WebhookClient,
}

impl WebhookExecutor {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Executor for WebhookExecutor {
    fn name(&self) -> &'static str {
        "WebhookExecutor"
    }

    async fn execute(&self, instruction: &TradingInstruction) -> Result<DispatchReceipt> {
        tracing::info!(ticker = %instruction.ticker, action = %instruction.action, "Dispatching instruction...");

        let payload = OrderPayload::from(instruction);
        let response = match self.client.post_order(&payload).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, "Failed to reach execution webhook; instruction may not have been delivered.");
                return Err(Error::ApiClientError(e));
            }
        };

        if !response.is_success() {
            tracing::error!(status = response.status, body = %response.body, "Execution webhook rejected the order.");
            return Err(Error::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!(status = response.status, "Instruction accepted by execution webhook.");
        Ok(DispatchReceipt {
            executor: self.name(),
            status: Some(response.status),
        })
    }
}
