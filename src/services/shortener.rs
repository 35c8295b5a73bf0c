//! 外部短链服务客户端
//!
//! Bitly v4 `POST /v4/shorten`. The HTTP call is blocking (ureq) and runs
//! on tokio's blocking pool.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ureq::Agent;

use crate::config::ShortenerConfig;
use crate::errors::{Result, ShortkeepError};

#[async_trait]
pub trait Shortener: Send + Sync {
    /// Shorten `long_url`, returning the short link
    async fn shorten(&self, long_url: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
pub struct ShortenRequest<'a> {
    pub long_url: &'a str,
    pub domain: &'a str,
    pub group_guid: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ShortenResponse {
    pub link: String,
}

#[derive(Clone)]
pub struct BitlyClient {
    agent: Agent,
    api_url: String,
    domain: String,
    group_guid: String,
    access_token: String,
}

impl BitlyClient {
    pub fn new(config: &ShortenerConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .build()
            .into();

        Self {
            agent,
            api_url: config.api_url.clone(),
            domain: config.domain.clone(),
            group_guid: config.group_guid.clone(),
            access_token: config.access_token.clone(),
        }
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn shorten_sync(&self, long_url: &str) -> Result<String> {
        if self.access_token.trim().is_empty() {
            return Err(ShortkeepError::config(
                "No access token configured (set shortener.access_token or BITLY_ACCESS_TOKEN)",
            ));
        }

        let body = ShortenRequest {
            long_url,
            domain: &self.domain,
            group_guid: &self.group_guid,
        };
        trace!("POST {} for {}", self.api_url, long_url);

        // 非 2xx 状态由 ureq 直接转为 Err
        let resp = self
            .agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .send_json(&body)?;

        let parsed: ShortenResponse = resp.into_body().read_json().map_err(|e| {
            ShortkeepError::shortener(format!("Unexpected response from {}: {}", self.api_url, e))
        })?;

        if parsed.link.trim().is_empty() {
            return Err(ShortkeepError::shortener("Response carried an empty link"));
        }

        debug!("Shortened {} -> {}", long_url, parsed.link);
        Ok(parsed.link)
    }
}

#[async_trait]
impl Shortener for BitlyClient {
    async fn shorten(&self, long_url: &str) -> Result<String> {
        // Agent 内部是 Arc，克隆很便宜
        let client = self.clone();
        let long_url = long_url.to_string();

        tokio::task::spawn_blocking(move || client.shorten_sync(&long_url))
            .await
            .map_err(|e| ShortkeepError::shortener(format!("Request task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "bitly"
    }
}
