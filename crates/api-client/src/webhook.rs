// In crates/api-client/src/webhook.rs

use crate::{Error, OrderPayload, Result, WebhookClient, WebhookResponse, truncate_body};
use app_config::ExecutionSettings;
use std::time::Duration;

impl WebhookClient {
    /// Constructs a new WebhookClient from ExecutionSettings.
    pub fn new(settings: &ExecutionSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(WebhookClient {
            http_client,
            url: settings.webhook_url.clone(),
            timeout,
        })
    }

    /// Posts an order as JSON.
    ///
    /// Any HTTP status is returned as a `WebhookResponse`; only transport
    /// failures and timeouts are errors here.
    pub async fn post_order(&self, payload: &OrderPayload) -> Result<WebhookResponse> {
        tracing::info!(?payload, "Sending order to execution webhook");

        let response = self
            .http_client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::from_request(e, self.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request(e, self.timeout))?;

        Ok(WebhookResponse {
            status,
            body: truncate_body(&body),
        })
    }
}
