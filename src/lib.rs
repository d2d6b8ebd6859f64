pub mod config;
pub mod error;
pub mod logging;
pub mod schema;
pub mod storage;

pub use config::Config;
pub use error::ProvisionError;
