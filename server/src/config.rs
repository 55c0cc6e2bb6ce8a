use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "shopping-list")]
#[command(about = "Shopping list web service")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database file, created on first start.
    #[arg(long, env = "SHOPPING_LIST_DB", default_value = "shopping_list.db")]
    pub database: PathBuf,

    /// Log request details at debug level.
    #[arg(long, env = "SHOPPING_LIST_DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `RUST_LOG` wins; otherwise `info`, or `debug` for this crate with `--debug`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if self.debug {
                EnvFilter::new("info,shopping_list_server=debug")
            } else {
                EnvFilter::new("info")
            }
        })
    }
}
