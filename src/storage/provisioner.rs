use crate::error::ProvisionError;
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, info};

/// Minimal bucket surface needed for provisioning.
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ProvisionError>;

    async fn create_bucket(&self, bucket: &str) -> Result<(), ProvisionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketReport {
    pub bucket: String,
    pub outcome: BucketOutcome,
}

impl fmt::Display for BucketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            BucketOutcome::Created => write!(f, "Bucket '{}' created successfully", self.bucket),
            BucketOutcome::AlreadyExists => write!(f, "Bucket '{}' already exists", self.bucket),
        }
    }
}

/// Create `bucket` unless the store already has it.
///
/// Issues at most one create call. Store errors are returned untouched.
pub async fn ensure_bucket<S>(store: &S, bucket: &str) -> Result<BucketReport, ProvisionError>
where
    S: BucketStore + ?Sized,
{
    let outcome = if store.bucket_exists(bucket).await? {
        debug!(bucket, "bucket present; nothing to do");
        BucketOutcome::AlreadyExists
    } else {
        store.create_bucket(bucket).await?;
        info!(bucket, "bucket created");
        BucketOutcome::Created
    };

    Ok(BucketReport {
        bucket: bucket.to_string(),
        outcome,
    })
}
