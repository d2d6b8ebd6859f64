//! Bucket provisioning against S3-compatible object storage.
//!
//! - `provisioner.rs`: the check-then-create flow and its outcome
//! - `s3.rs`: `BucketStore` backed by aws-sdk-s3

pub mod provisioner;
pub mod s3;

pub use provisioner::{BucketOutcome, BucketReport, BucketStore, ensure_bucket};
pub use s3::S3BucketStore;
