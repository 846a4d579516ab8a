//! Mastodon publisher. Title and body go out as a single status.

use super::{Publisher, endpoint, ensure_success};
use crate::config::MastodonConfig;
use crate::error::{DigestError, Result};
use crate::models::Report;
use reqwest::Client;
use serde::Serialize;

const PLATFORM: &str = "Mastodon";

#[derive(Debug, Serialize)]
pub struct StatusRequest<'a> {
    pub status: &'a str,
    pub visibility: &'a str,
}

pub struct MastodonPublisher {
    client: Client,
    config: MastodonConfig,
}

impl MastodonPublisher {
    pub fn new(client: Client, config: MastodonConfig) -> Self {
        Self { client, config }
    }
}

impl Publisher for MastodonPublisher {
    fn name(&self) -> &str {
        PLATFORM
    }

    async fn publish(&self, report: &Report) -> Result<()> {
        let status = report.as_status();
        let response = self
            .client
            .post(endpoint(&self.config.server, "/api/v1/statuses"))
            .bearer_auth(&self.config.token)
            .json(&StatusRequest {
                status: &status,
                visibility: &self.config.visibility,
            })
            .send()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "status request failed", e))?;

        ensure_success(PLATFORM, response).await?;
        Ok(())
    }
}
