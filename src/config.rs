//! Process-wide configuration.
//!
//! Every field has a built-in default; environment variables take precedence.
//!
//! - `CLICKHOUSE_URL`, `CLICKHOUSE_USER`, `CLICKHOUSE_PASSWORD`
//! - `MINIO_ENDPOINT`, `MINIO_ACCESS_KEY`, `MINIO_SECRET_KEY`, `MINIO_SECURE`, `MINIO_REGION`
//! - `LOGLEVEL`

use crate::error::ProvisionError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CLICKHOUSE_URL: &str = "http://clickhouse:8123/";
pub const DEFAULT_CLICKHOUSE_USER: &str = "nope";
pub const DEFAULT_CLICKHOUSE_PASSWORD: &str = "nope";
pub const CLICKHOUSE_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_STORAGE_ENDPOINT: &str = "minio:10000";
pub const DEFAULT_STORAGE_ACCESS_KEY: &str = "minioadmin";
pub const DEFAULT_STORAGE_SECRET_KEY: &str = "minioadminpassword";
pub const DEFAULT_STORAGE_REGION: &str = "us-east-1";

pub const DEFAULT_LOGLEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub loglevel: String,
    pub clickhouse: ClickhouseConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickhouseConfig {
    pub url: Url,
    pub user: String,
    pub password: String,
}

/// S3-compatible object storage (MinIO in the docker setup).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `host:port`, without scheme.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub secure: bool,
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: DEFAULT_LOGLEVEL.to_string(),
            clickhouse: ClickhouseConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ClickhouseConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_CLICKHOUSE_URL).expect("default ClickHouse url is valid"),
            user: DEFAULT_CLICKHOUSE_USER.to_string(),
            password: DEFAULT_CLICKHOUSE_PASSWORD.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_STORAGE_ENDPOINT.to_string(),
            access_key: DEFAULT_STORAGE_ACCESS_KEY.to_string(),
            secret_key: DEFAULT_STORAGE_SECRET_KEY.to_string(),
            secure: false,
            region: DEFAULT_STORAGE_REGION.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }
}

impl Config {
    /// Defaults overlaid with the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(
                Env::prefixed("CLICKHOUSE_")
                    .only(&["url", "user", "password"])
                    .map(|key| format!("clickhouse.{key}").into()),
            )
            .merge(
                Env::prefixed("MINIO_")
                    .only(&["endpoint", "access_key", "secret_key", "secure", "region"])
                    .map(|key| format!("storage.{key}").into()),
            )
            .merge(Env::raw().only(&["loglevel"]))
    }

    pub fn from_env() -> Result<Self, ProvisionError> {
        Ok(Self::figment().extract()?)
    }
}
