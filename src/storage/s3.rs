use super::provisioner::BucketStore;
use crate::config::StorageConfig;
use crate::error::ProvisionError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::debug;

/// `BucketStore` over a MinIO-compatible S3 endpoint with static credentials.
pub struct S3BucketStore {
    client: Client,
}

impl S3BucketStore {
    pub async fn connect(cfg: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            cfg.access_key.clone(),
            cfg.secret_key.clone(),
            None,
            None,
            "mlop-provision",
        );
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .endpoint_url(cfg.endpoint_url())
            .credentials_provider(credentials)
            .load()
            .await;
        // MinIO serves buckets by path, not by virtual host.
        let conf = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();
        debug!(endpoint = %cfg.endpoint_url(), "S3 client configured");
        Self {
            client: Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl BucketStore for S3BucketStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ProvisionError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_not_found())
                    || err.raw_response().map(|r| r.status().as_u16()) == Some(404);
                if not_found {
                    Ok(false)
                } else {
                    Err(ProvisionError::storage(DisplayErrorContext(&err)))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), ProvisionError> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| ProvisionError::storage(DisplayErrorContext(&err)))?;
        Ok(())
    }
}
