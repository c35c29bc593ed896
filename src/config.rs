use clap::Parser;
use std::time::Duration;

// ============================================================================
// Process Configuration
// ============================================================================
//
// Every option can come from a flag or its environment variable. Only
// `main` reads this; the domain and persistence layers receive
// already-built collaborators.
//
// ============================================================================

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Order lifecycle service", long_about = None)]
pub struct Config {
    #[arg(long, env = "POSTGRES_HOST", default_value = "localhost")]
    pub postgres_host: String,

    #[arg(long, env = "POSTGRES_PORT", default_value_t = 5432)]
    pub postgres_port: u16,

    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    pub postgres_user: String,

    #[arg(long, env = "POSTGRES_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub postgres_password: String,

    #[arg(long, env = "POSTGRES_DBNAME", default_value = "inventory")]
    pub postgres_dbname: String,

    /// Full connection URL; overrides the individual POSTGRES_* settings
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub server_host: String,

    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    pub server_port: u16,

    /// Upper bound for a single storage call, in milliseconds
    #[arg(long, env = "STORAGE_TIMEOUT_MS", default_value_t = 5000)]
    pub storage_timeout_ms: u64,

    /// Do not create the orders table on startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Keep orders in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

impl Config {
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode=disable",
                self.postgres_user,
                self.postgres_password,
                self.postgres_host,
                self.postgres_port,
                self.postgres_dbname
            ),
        }
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}
