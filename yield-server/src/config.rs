use std::net::SocketAddr;

use clap::{Parser, ValueEnum};
use yield_core::db::DbConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Local timestamp, colored level and source location.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Rental yield calculator API server.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long = "listen", env = "YIELD_LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen_addr: SocketAddr,

    /// Database backend to use.
    #[arg(long, env = "YIELD_DB_BACKEND", default_value = "sqlite")]
    pub backend: String,

    /// Database connection string.
    /// For SQLite this is a sqlx URL, a file path or `:memory:`.
    #[arg(long, env = "YIELD_DB", default_value = "sqlite:simulations.db?mode=rwc")]
    pub db: String,

    /// Log output format.
    #[arg(long, env = "YIELD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    /// Parse arguments after loading `.env` from the working directory, if any.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_arguments_are_parsed() {
        let config = Config::try_parse_from([
            "yield-server",
            "--listen",
            "127.0.0.1:8080",
            "--backend",
            "sqlite",
            "--db",
            ":memory:",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.db_config(),
            DbConfig {
                backend: "sqlite".to_string(),
                connection_string: ":memory:".to_string(),
            }
        );
    }

    #[test]
    fn invalid_listen_address_is_rejected() {
        let result = Config::try_parse_from(["yield-server", "--listen", "not-an-address"]);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = Config::try_parse_from(["yield-server", "--log-format", "xml"]);

        assert!(result.is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;

        Config::command().debug_assert();
    }
}
