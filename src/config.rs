//! Command line and environment configuration for the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// The database file used when none is configured.
pub const DEFAULT_DB_CONNECTION: &str = "financial_tracker.db";

/// The REST API server for tracking income and expenses.
///
/// Every option can also be set with an environment variable, including from
/// a `.env` file in the working directory.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_CONNECTION", default_value = DEFAULT_DB_CONNECTION)]
    pub db_connection: String,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// The only origin allowed to make cross-origin requests, e.g.
    /// "http://localhost:3000". Any origin is allowed if not set.
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

impl Config {
    /// The socket address the server should bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use clap::Parser;

    use super::{Config, DEFAULT_DB_CONNECTION};

    #[test]
    fn explicit_arguments_are_parsed() {
        let config = Config::try_parse_from([
            "server",
            "--db-connection",
            "test.db",
            "--host",
            "0.0.0.0",
            "-p",
            "3000",
            "--allowed-origin",
            "http://localhost:5173",
        ])
        .expect("Could not parse arguments");

        assert_eq!(
            config,
            Config {
                db_connection: "test.db".to_owned(),
                host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                port: 3000,
                allowed_origin: Some("http://localhost:5173".to_owned()),
            }
        );
        assert_eq!(
            config.socket_addr(),
            SocketAddr::from(([0, 0, 0, 0], 3000))
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = Config::try_parse_from(["server", "--port", "eighty"]);

        assert!(result.is_err());
    }

    #[test]
    fn defaults_are_sensible() {
        // Only checked when the environment does not override the defaults.
        if std::env::var_os("DB_CONNECTION").is_some()
            || std::env::var_os("HOST").is_some()
            || std::env::var_os("PORT").is_some()
        {
            return;
        }

        let config = Config::try_parse_from(["server"]).expect("Could not parse arguments");

        assert_eq!(config.db_connection, DEFAULT_DB_CONNECTION);
        assert_eq!(config.socket_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
    }
}
