use clap::{Args, Parser, Subcommand};

// ============================================================================
// Configuration
// ============================================================================
//
// Every setting is a CLI flag that falls back to an environment variable
// (a `.env` file is loaded into the environment first).
//
// ============================================================================

/// Read-only JSON endpoints over the storefront schema
#[derive(Parser, Debug)]
#[command(name = "storefront_queries")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Recreate the schema and fill it with synthetic rows
    Seed(SeedConfig),

    /// Run EXPLAIN ANALYZE and time every endpoint statement
    Bench,
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the PG* settings
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "PGHOST", default_value = "localhost", global = true)]
    pub pg_host: String,

    #[arg(long, env = "PGPORT", default_value_t = 5432, global = true)]
    pub pg_port: u16,

    #[arg(long, env = "PGUSER", default_value = "postgres", global = true)]
    pub pg_user: String,

    #[arg(long, env = "PGPASSWORD", default_value = "", hide_env_values = true, global = true)]
    pub pg_password: String,

    #[arg(long, env = "PGDATABASE", default_value = "postgres", global = true)]
    pub pg_database: String,

    /// Upper bound on concurrently open connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10, global = true)]
    pub max_connections: u32,

    /// How long a query waits for a free connection before failing
    #[arg(long, env = "DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None if self.pg_password.is_empty() => format!(
                "postgres://{}@{}:{}/{}",
                self.pg_user, self.pg_host, self.pg_port, self.pg_database
            ),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.pg_user, self.pg_password, self.pg_host, self.pg_port, self.pg_database
            ),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000, global = true)]
    pub port: u16,

    /// Worker threads; defaults to the number of CPUs
    #[arg(long, env = "WORKERS", global = true)]
    pub workers: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct SeedConfig {
    #[arg(long, default_value_t = 5)]
    pub categories: usize,

    #[arg(long, default_value_t = 1000)]
    pub customers: usize,

    #[arg(long, default_value_t = 500)]
    pub products: usize,

    #[arg(long, default_value_t = 2000)]
    pub orders: usize,
}
