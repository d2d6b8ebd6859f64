//! Applying bundled SQL scripts to ClickHouse over its HTTP interface.
//!
//! Layout:
//! - `loader.rs`: discovers `*.sql` files in a directory
//! - `clickhouse.rs`: minimal HTTP query client
//! - `applier.rs`: per-script execution and outcome classification

pub mod applier;
pub mod clickhouse;
pub mod loader;

pub use applier::{ApplyReport, ScriptOutcome, ScriptReport, apply_dir, apply_scripts, classify};
pub use clickhouse::{ClickhouseClient, QueryResponse};
pub use loader::{SqlScript, default_sql_dir, load_scripts};
