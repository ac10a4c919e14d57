//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `MongoDB` connection string
    #[arg(long, env = "MONGODB_URL", hide_env_values = true)]
    pub mongodb_url: String,

    /// `MongoDB` database name
    #[arg(long, env = "MONGODB_DATABASE", default_value = "kiosk")]
    pub mongodb_database: String,
}
