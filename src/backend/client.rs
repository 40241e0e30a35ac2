//! HTTP client for the simulator endpoints.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::pagination::{FetchMoreResponse, PageCursor};
use crate::payload::WebhookEnvelope;

/// Per-request timeout. Keeps a stalled simulator from pinning the poll
/// scheduler's in-flight slot forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("simulator returned {0}")]
    Status(StatusCode),
}

/// Inbound reply from the poll endpoint. Only `text.body` is consumed.
#[derive(Deserialize, Debug, Clone)]
pub struct InboundMessage {
    pub text: InboundText,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InboundText {
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct SimulatorClient {
    http: Client,
    base: String,
}

impl SimulatorClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            http: Client::new(),
            base,
        }
    }

    /// POST one webhook envelope. The response body carries no contract;
    /// only the status matters.
    pub async fn send(&self, envelope: &WebhookEnvelope) -> Result<(), ClientError> {
        let res = self
            .http
            .post(format!("{}/simulate/send", self.base))
            .timeout(REQUEST_TIMEOUT)
            .json(envelope)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }
        Ok(())
    }

    /// Fetch pending replies for the given phone identity.
    pub async fn poll(&self, phone: &str) -> Result<Vec<InboundMessage>, ClientError> {
        let res = self
            .http
            .get(format!("{}/simulate/poll", self.base))
            .timeout(REQUEST_TIMEOUT)
            .query(&[("phone", phone)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }
        Ok(res.json::<Vec<InboundMessage>>().await?)
    }

    /// Fetch one more carousel page for a cursor.
    pub async fn fetch_more(&self, cursor: &PageCursor) -> Result<String, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/fetch_more", self.base))
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("type", cursor.kind.clone()),
                ("query", cursor.query.clone()),
                ("page", cursor.page.to_string()),
            ])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status()));
        }
        Ok(res.json::<FetchMoreResponse>().await?.html)
    }
}
