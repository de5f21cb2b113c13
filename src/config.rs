//! Run configuration: connection string from the environment, everything
//! else from the command line.

use std::path::PathBuf;

use crate::error::{LoadError, Result};
use crate::query::DEFAULT_BALANCE_THRESHOLD;
use crate::{MongoLoader, WriteMode, DEFAULT_BATCH_SIZE};

pub const CONNECTION_ENV: &str = "MONGODB_URI";
pub const DEFAULT_DATABASE: &str = "tpch";
pub const DEFAULT_CUSTOMER_PATH: &str = "assignment/data/customer.tbl";
pub const DEFAULT_ORDER_PATH: &str = "assignment/data/order.tbl";

/// Read the connection string through `lookup`; missing and empty are both
/// configuration errors.
pub fn connection_string<F>(lookup: F) -> Result<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(CONNECTION_ENV) {
        Some(uri) if !uri.is_empty() => Ok(uri),
        _ => Err(LoadError::Config(format!(
            "{CONNECTION_ENV} environment variable is not set"
        ))),
    }
}

pub fn connection_string_from_env() -> Result<String> {
    connection_string(|key| std::env::var(key).ok())
}

#[derive(Debug, Clone)]
pub struct Config {
    /// mongodb style connection string. `mongodb://<user>:<password>@host.domain`
    pub connection_str: String,
    /// the name of the mongodb database
    pub database: String,
    pub customers: PathBuf,
    pub orders: PathBuf,
    /// number of records submitted per bulk insert
    pub batch_size: usize,
    pub write_mode: WriteMode,
    pub balance_threshold: f64,
    pub run_queries: bool,
}

impl Config {
    pub fn new(connection_str: String) -> Self {
        Config {
            connection_str,
            database: DEFAULT_DATABASE.to_owned(),
            customers: PathBuf::from(DEFAULT_CUSTOMER_PATH),
            orders: PathBuf::from(DEFAULT_ORDER_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            write_mode: WriteMode::Unordered,
            balance_threshold: DEFAULT_BALANCE_THRESHOLD,
            run_queries: true,
        }
    }

    pub fn loader(&self) -> MongoLoader {
        MongoLoader::default()
            .with_batch_size(self.batch_size)
            .with_write_mode(self.write_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_connection_string_is_config_error() {
        let err = connection_string(|_| None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(CONNECTION_ENV));
    }

    #[test]
    fn empty_connection_string_is_config_error() {
        let err = connection_string(|_| Some(String::new())).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn connection_string_is_read_from_expected_key() {
        let uri = connection_string(|key| {
            assert_eq!(key, "MONGODB_URI");
            Some("mongodb://localhost:27017".to_owned())
        })
        .unwrap();
        assert_eq!(uri, "mongodb://localhost:27017");
    }

    #[test]
    fn defaults() {
        let config = Config::new("mongodb://localhost".into());
        assert_eq!(config.database, "tpch");
        let loader = config.loader();
        assert_eq!(loader.batch_size, 10_000);
        assert_eq!(loader.write_mode, WriteMode::Unordered);
    }
}
