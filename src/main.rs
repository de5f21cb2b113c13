#![deny(clippy::all)]

//! tpch-mongo - load TPC-H customer and order files into mongodb
//!
//! Both collections are dropped and fully reloaded on every run, then two
//! example queries are printed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use tpch_mongo::config::{
    connection_string_from_env, CONNECTION_ENV, DEFAULT_CUSTOMER_PATH, DEFAULT_DATABASE,
    DEFAULT_ORDER_PATH,
};
use tpch_mongo::prelude::*;
use tpch_mongo::query::DEFAULT_BALANCE_THRESHOLD;
use tpch_mongo::DEFAULT_BATCH_SIZE;

/// Exit status when the connection string is missing.
const EXIT_CONFIG: u8 = 1;
/// Exit status for any failure after configuration was accepted. clap
/// already uses 2 for usage errors.
const EXIT_FAILURE: u8 = 3;

#[derive(Parser)]
#[command(name = "tpch-mongo")]
#[command(about = "Bulk-load TPC-H customer and order files into mongodb")]
#[command(after_help = "The connection string is read from the MONGODB_URI environment variable.")]
#[command(version)]
struct Cli {
    /// Pipe-delimited customer file
    #[arg(long, default_value = DEFAULT_CUSTOMER_PATH)]
    customers: PathBuf,

    /// Pipe-delimited orders file
    #[arg(long, default_value = DEFAULT_ORDER_PATH)]
    orders: PathBuf,

    /// Target database
    #[arg(long, default_value = DEFAULT_DATABASE)]
    database: String,

    /// Records per bulk insert
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
    batch_size: usize,

    /// Stop each bulk insert at its first failed document
    #[arg(long)]
    ordered: bool,

    /// Account balance threshold for the customer query
    #[arg(long, default_value_t = DEFAULT_BALANCE_THRESHOLD)]
    balance_threshold: f64,

    /// Load only, do not run the example queries
    #[arg(long)]
    skip_queries: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self, connection_str: String) -> Config {
        let mut config = Config::new(connection_str);
        config.database = self.database;
        config.customers = self.customers;
        config.orders = self.orders;
        config.batch_size = self.batch_size;
        config.write_mode = if self.ordered {
            WriteMode::Ordered
        } else {
            WriteMode::Unordered
        };
        config.balance_threshold = self.balance_threshold;
        config.run_queries = !self.skip_queries;
        config
    }
}

fn parse_batch_size(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let connection_str = match connection_string_from_env() {
        Ok(uri) => uri,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Set {CONNECTION_ENV} to a mongodb connection string, e.g. mongodb://localhost:27017");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let config = cli.into_config(connection_str);
    match run(&config) {
        Ok(()) => {
            println!("Load completed successfully!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:?}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// The client lives for the whole run and is dropped on every return path.
fn run(config: &Config) -> Result<()> {
    let client = connect(&config.connection_str).context("unable to connect to mongodb")?;
    let db = client.database(&config.database);
    let loader = config.loader();

    for (kind, path) in [
        (RecordKind::Customer, &config.customers),
        (RecordKind::Order, &config.orders),
    ] {
        let mut target = collection(&db, kind);
        loader
            .load_file(kind, path, &mut target)
            .with_context(|| format!("loading {} from {}", kind, path.display()))?;
        println!("{} data loaded.", kind.label());
    }

    if config.run_queries {
        run_queries(&db, config.balance_threshold).context("running example queries")?;
    }
    Ok(())
}
