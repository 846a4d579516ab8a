//! [Lemmy](https://join-lemmy.org/api/) publisher: login, community lookup, post.

use super::{Publisher, endpoint, ensure_success};
use crate::config::LemmyConfig;
use crate::error::{DigestError, Result};
use crate::models::Report;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PLATFORM: &str = "Lemmy";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    jwt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommunityResponse {
    community_view: CommunityView,
}

#[derive(Debug, Deserialize)]
struct CommunityView {
    community: Community,
}

#[derive(Debug, Deserialize)]
struct Community {
    id: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatePost<'a> {
    pub name: &'a str,
    pub body: &'a str,
    pub community_id: i64,
}

pub struct LemmyPublisher {
    client: Client,
    config: LemmyConfig,
}

impl LemmyPublisher {
    pub fn new(client: Client, config: LemmyConfig) -> Self {
        Self { client, config }
    }

    /// Fresh JWT for the configured account
    async fn login(&self) -> Result<String> {
        let response = self
            .client
            .post(endpoint(&self.config.server, "/api/v3/user/login"))
            .json(&LoginRequest {
                username_or_email: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "login request failed", e))?;

        let login: LoginResponse = ensure_success(PLATFORM, response)
            .await?
            .json()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "cannot decode login response", e))?;

        // No token means the account still awaits email verification or approval
        login
            .jwt
            .ok_or_else(|| DigestError::publish_rejected(PLATFORM, 401, "login returned no jwt"))
    }

    async fn community_id(&self, jwt: &str) -> Result<i64> {
        let response = self
            .client
            .get(endpoint(&self.config.server, "/api/v3/community"))
            .query(&[("name", self.config.community.as_str())])
            .bearer_auth(jwt)
            .send()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "community lookup failed", e))?;

        let community: CommunityResponse = ensure_success(PLATFORM, response)
            .await?
            .json()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "cannot decode community response", e))?;

        Ok(community.community_view.community.id)
    }

    async fn create_post(&self, jwt: &str, community_id: i64, report: &Report) -> Result<()> {
        let response = self
            .client
            .post(endpoint(&self.config.server, "/api/v3/post"))
            .bearer_auth(jwt)
            .json(&CreatePost {
                name: &report.title,
                body: &report.body,
                community_id,
            })
            .send()
            .await
            .map_err(|e| DigestError::http(PLATFORM, "post request failed", e))?;

        ensure_success(PLATFORM, response).await?;
        Ok(())
    }
}

impl Publisher for LemmyPublisher {
    fn name(&self) -> &str {
        PLATFORM
    }

    async fn publish(&self, report: &Report) -> Result<()> {
        let jwt = self.login().await?;
        let community_id = self.community_id(&jwt).await?;
        debug!("Community '{}' has id {}", self.config.community, community_id);
        self.create_post(&jwt, community_id, report).await
    }
}
