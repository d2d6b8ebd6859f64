use crate::config::{CLICKHOUSE_TIMEOUT, ClickhouseConfig};
use crate::error::ProvisionError;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends raw SQL to ClickHouse's HTTP endpoint as the `query` parameter.
#[derive(Clone)]
pub struct ClickhouseClient {
    http: reqwest::Client,
    url: Url,
    user: String,
    password: String,
    timeout: Duration,
}

impl ClickhouseClient {
    pub fn new(cfg: &ClickhouseConfig) -> Result<Self, ProvisionError> {
        Self::with_timeout(cfg, CLICKHOUSE_TIMEOUT)
    }

    pub fn with_timeout(cfg: &ClickhouseConfig, timeout: Duration) -> Result<Self, ProvisionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mlop-provision/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: cfg.url.clone(),
            user: cfg.user.clone(),
            password: cfg.password.clone(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `<url>?query=<sql>`. The SQL is not escaped; only line breaks and tabs
    /// are percent-encoded because URL parsing would drop them.
    pub fn query_url(&self, sql: &str) -> Result<Url, ProvisionError> {
        let raw = format!("{}?query={}", self.url, encode_whitespace_controls(sql));
        Ok(Url::parse(&raw)?)
    }

    /// POST one statement. Any HTTP status is a response; only transport
    /// failures (including the timeout) are errors.
    pub async fn execute(&self, sql: &str) -> Result<QueryResponse, ProvisionError> {
        let url = self.query_url(sql)?;
        let resp = self
            .http
            .post(url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = %status, body_len = body.len(), "clickhouse responded");
        Ok(QueryResponse { status, body })
    }
}

fn encode_whitespace_controls(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    for c in sql.chars() {
        match c {
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            '\t' => out.push_str("%09"),
            c => out.push(c),
        }
    }
    out
}
