use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Record a check for a student, exactly as the API would.
    Check(CheckArgs),
    /// Query visit logs.
    Logs(LogsArgs),
    /// Show a student's newest log.
    LastLog(LastLogArgs),
    /// Load gates and users from a TOML file.
    Import(ImportArgs),
}

/// Arguments for `gatepass serve`.
#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,
    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments for `gatepass check`.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Student user ID.
    #[arg(long)]
    pub student: String,
    /// Gate code.
    #[arg(long)]
    pub gate: String,
    /// IN or OUT.
    #[arg(long)]
    pub direction: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    /// Required when going OUT.
    #[arg(long)]
    pub reason: Option<String>,
}

/// Arguments for `gatepass logs`.
#[derive(Clone, Debug, Default, Args)]
pub struct LogsArgs {
    #[arg(long)]
    pub student: Option<String>,
    /// boys or girls.
    #[arg(long)]
    pub hostel: Option<String>,
    /// Gate ID or code.
    #[arg(long)]
    pub gate: Option<String>,
    /// IN or OUT.
    #[arg(long)]
    pub direction: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD (inclusive).
    #[arg(long)]
    pub from: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD (inclusive, whole day).
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for `gatepass last-log`.
#[derive(Clone, Debug, Args)]
pub struct LastLogArgs {
    #[arg(long)]
    pub student: String,
}

/// Arguments for `gatepass import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// TOML file with `[[users]]` and `[[gates]]` tables.
    pub file: PathBuf,
}
