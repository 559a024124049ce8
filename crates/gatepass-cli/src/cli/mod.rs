use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gatepass` binary.
#[derive(Debug, Parser)]
#[command(name = "gatepass", version, about = "Hostel gate-pass backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path`)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            database: self.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "gatepass",
            "--format",
            "raw",
            "--limit",
            "10",
            "--verbose",
            "last-log",
            "--student",
            "usr-00000001",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::LastLog(ref a) if a.student == "usr-00000001"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["gatepass", "logs", "--hostel", "boys", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Logs(ref a) if a.hostel.as_deref() == Some("boys")));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["gatepass", "--format", "xml", "logs"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn check_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "gatepass",
            "check",
            "--student",
            "usr-00000001",
            "--gate",
            "BH-MAIN",
            "--direction",
            "out",
            "--lat",
            "-33.8688",
            "--lng",
            "151.2093",
            "--reason",
            "Dinner",
        ])
        .expect("cli should parse");

        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert!((args.lat + 33.8688).abs() < f64::EPSILON);
        assert_eq!(args.reason.as_deref(), Some("Dinner"));
    }

    #[test]
    fn check_requires_coordinates() {
        let parsed = Cli::try_parse_from([
            "gatepass",
            "check",
            "--student",
            "usr-00000001",
            "--gate",
            "BH-MAIN",
            "--direction",
            "IN",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["gatepass", "--database", ":memory:", "serve"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some(":memory:"));
    }
}
