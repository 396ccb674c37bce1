use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::{DelegateResponse, SubmissionDelegate};
use crate::models::BookingRequest;

/// Posts bookings as JSON to a lead-capture endpoint.
pub struct HttpSubmissionDelegate {
    endpoint: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpSubmissionDelegate {
    pub fn new(endpoint: String, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build lead endpoint client")?;

        Ok(Self {
            endpoint,
            token,
            client,
        })
    }
}

#[async_trait]
impl SubmissionDelegate for HttpSubmissionDelegate {
    async fn submit(&self, request: &BookingRequest) -> anyhow::Result<DelegateResponse> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut req = self
            .client
            .post(&self.endpoint)
            .header("X-Request-Id", &request_id)
            .json(request);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.context("failed to reach lead endpoint")?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read lead endpoint response")?;

        tracing::debug!(request_id = %request_id, %status, "lead endpoint replied");

        let parsed = serde_json::from_str::<DelegateResponse>(&text).ok();

        if !status.is_success() {
            let reason = parsed
                .and_then(|r| r.error)
                .or_else(|| error_field(&text));
            tracing::warn!(request_id = %request_id, %status, "lead endpoint rejected booking");
            return Ok(DelegateResponse::failed(reason));
        }

        match parsed {
            Some(resp) => Ok(resp),
            // Endpoints that answer 2xx with no body count as accepted.
            None if text.trim().is_empty() => Ok(DelegateResponse::ok()),
            None => {
                tracing::warn!(request_id = %request_id, %status, "unreadable lead endpoint reply");
                Ok(DelegateResponse::failed(error_field(&text)))
            }
        }
    }
}

fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["error"]
        .as_str()
        .or_else(|| value["message"].as_str())
        .map(|s| s.to_string())
}
