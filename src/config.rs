//! Configuration handling for the Logs MCP Server.
//!
//! Settings come from CLI arguments with environment variable fallbacks.
//! `main` loads a `.env` file first, so the `POSTGRES_*` variables can live
//! next to the binary.

use clap::{Parser, ValueEnum};
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";

// Pool configuration defaults
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 60;

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Pool limits handed to the connection provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub idle_timeout: Duration,
    /// How long a call waits for a connection before failing.
    pub connect_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            max_lifetime: Duration::from_secs(DEFAULT_MAX_LIFETIME_SECS),
        }
    }
}

impl PoolSettings {
    /// Validate pool settings and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("max_connections must be greater than 0".to_string());
        }
        if self.connect_timeout.is_zero() {
            return Err("connect_timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Configuration for the Logs MCP Server.
#[derive(Clone, Parser)]
#[command(
    name = "logs-mcp-server",
    about = "MCP server for PostgreSQL log analysis - list, describe and query tables",
    version,
    author
)]
pub struct Config {
    /// PostgreSQL user
    #[arg(long, env = "POSTGRES_USER")]
    pub pg_user: Option<String>,

    /// PostgreSQL password (never logged)
    #[arg(long, env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub pg_password: Option<String>,

    /// PostgreSQL host
    #[arg(long, env = "POSTGRES_HOST")]
    pub pg_host: Option<String>,

    /// PostgreSQL port
    #[arg(long, env = "POSTGRES_PORT")]
    pub pg_port: Option<u16>,

    /// PostgreSQL database name
    #[arg(long, env = "POSTGRES_DB")]
    pub pg_database: Option<String>,

    /// Maximum number of pooled connections
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        env = "MCP_POOL_MAX_CONNECTIONS"
    )]
    pub max_connections: u32,

    /// Idle timeout for pooled connections, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_IDLE_TIMEOUT_SECS,
        env = "MCP_POOL_IDLE_TIMEOUT"
    )]
    pub idle_timeout: u64,

    /// Connection acquire timeout, in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_MS,
        env = "MCP_POOL_CONNECT_TIMEOUT_MS"
    )]
    pub connect_timeout: u64,

    /// Maximum lifetime of a pooled connection, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_LIFETIME_SECS,
        env = "MCP_POOL_MAX_LIFETIME"
    )]
    pub max_lifetime: u64,

    /// Transport mode (stdio or http)
    #[arg(
        short,
        long,
        value_enum,
        default_value = "stdio",
        env = "MCP_TRANSPORT"
    )]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_HTTP_HOST,
        env = "MCP_HTTP_HOST"
    )]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(
        long,
        default_value_t = DEFAULT_HTTP_PORT,
        env = "MCP_HTTP_PORT"
    )]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(
        long,
        default_value = DEFAULT_MCP_ENDPOINT,
        env = "MCP_ENDPOINT"
    )]
    pub mcp_endpoint: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    #[cfg(test)]
    fn default_config() -> Self {
        Self {
            pg_user: None,
            pg_password: None,
            pg_host: None,
            pg_port: None,
            pg_database: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_MS,
            max_lifetime: DEFAULT_MAX_LIFETIME_SECS,
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Pool settings derived from the pool flags.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            idle_timeout: Duration::from_secs(self.idle_timeout),
            connect_timeout: Duration::from_millis(self.connect_timeout),
            max_lifetime: Duration::from_secs(self.max_lifetime),
        }
    }

    /// Build driver connect options from the discrete settings.
    ///
    /// Unset fields keep the driver defaults (which honour the `PG*` variables).
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new().application_name("logs-mcp-server");
        if let Some(host) = &self.pg_host {
            options = options.host(host);
        }
        if let Some(port) = self.pg_port {
            options = options.port(port);
        }
        if let Some(user) = &self.pg_user {
            options = options.username(user);
        }
        if let Some(password) = &self.pg_password {
            options = options.password(password);
        }
        if let Some(database) = &self.pg_database {
            options = options.database(database);
        }
        options
    }

    /// Human-readable connection target for logs (no credentials).
    pub fn target_description(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.pg_user.as_deref().unwrap_or("<default>"),
            self.pg_host.as_deref().unwrap_or("<default>"),
            self.pg_port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "<default>".to_string()),
            self.pg_database.as_deref().unwrap_or("<default>"),
        )
    }

    /// Validate the configuration before starting.
    pub fn validate(&self) -> Result<(), String> {
        self.pool_settings().validate()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("pg_user", &self.pg_user)
            .field("pg_password", &self.pg_password.as_ref().map(|_| "***"))
            .field("pg_host", &self.pg_host)
            .field("pg_port", &self.pg_port)
            .field("pg_database", &self.pg_database)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_lifetime", &self.max_lifetime)
            .field("transport", &self.transport)
            .field("http_host", &self.http_host)
            .field("http_port", &self.http_port)
            .field("mcp_endpoint", &self.mcp_endpoint)
            .field("log_level", &self.log_level)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}
