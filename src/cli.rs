//! Command-line interface definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for confpatch.
#[derive(Parser, Debug)]
#[command(
    name = "confpatch",
    about = "Patch section/directive config files without losing formatting",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without writing files
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse files and verify they serialize back unchanged
    Check(CheckOpts),
    /// List sections and directives of a file
    Show(ShowOpts),
    /// Print the values of a key in one section
    Get(GetOpts),
    /// Replace every value of each key with the given one
    Set(EditOpts),
    /// Add directives that are not already present
    Add(EditOpts),
    /// Apply a TOML patch plan
    Apply(ApplyOpts),
    /// Print version information
    Version,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CheckOpts {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Options for the `show` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ShowOpts {
    /// File to show
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `get` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct GetOpts {
    /// File to read
    pub file: PathBuf,

    /// Section title
    pub section: String,

    /// Directive key
    pub key: String,

    /// Select the section containing this exact KEY=VALUE
    #[arg(long = "match", value_name = "KEY=VALUE")]
    pub matching: Option<String>,
}

/// Options for the `set` and `add` subcommands.
#[derive(Parser, Debug, Clone)]
pub struct EditOpts {
    /// File to edit
    pub file: PathBuf,

    /// Section title
    pub section: String,

    /// Directives to write
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub directives: Vec<String>,

    /// Select the section containing this exact KEY=VALUE
    #[arg(long = "match", value_name = "KEY=VALUE")]
    pub matching: Option<String>,

    /// Create the file and section when missing
    #[arg(long)]
    pub create: bool,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Path to the TOML patch plan
    pub plan: PathBuf,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_multiple_files() {
        let cli = Cli::parse_from(["confpatch", "check", "a.conf", "b.service"]);
        assert!(
            matches!(&cli.command, Command::Check(_)),
            "Expected Check command"
        );
        if let Command::Check(opts) = cli.command {
            assert_eq!(opts.files, vec![PathBuf::from("a.conf"), PathBuf::from("b.service")]);
        }
    }

    #[test]
    fn check_requires_a_file() {
        assert!(Cli::try_parse_from(["confpatch", "check"]).is_err());
    }

    #[test]
    fn parse_show_json() {
        let cli = Cli::parse_from(["confpatch", "show", "wg0.conf", "--json"]);
        assert!(matches!(cli.command, Command::Show(ShowOpts { json: true, .. })));
    }

    #[test]
    fn parse_get_with_match() {
        let cli = Cli::parse_from([
            "confpatch",
            "get",
            "wg0.conf",
            "Peer",
            "AllowedIPs",
            "--match",
            "PublicKey=YYYY",
        ]);
        assert!(
            matches!(&cli.command, Command::Get(_)),
            "Expected Get command"
        );
        if let Command::Get(opts) = cli.command {
            assert_eq!(opts.section, "Peer");
            assert_eq!(opts.key, "AllowedIPs");
            assert_eq!(opts.matching.as_deref(), Some("PublicKey=YYYY"));
        }
    }

    #[test]
    fn parse_set_multiple_directives() {
        let cli = Cli::parse_from([
            "confpatch",
            "set",
            "wg0.conf",
            "Interface",
            "ListenPort=51820",
            "Address=10.0.0.1/24",
        ]);
        assert!(
            matches!(&cli.command, Command::Set(_)),
            "Expected Set command"
        );
        if let Command::Set(opts) = cli.command {
            assert_eq!(opts.directives, vec!["ListenPort=51820", "Address=10.0.0.1/24"]);
            assert!(!opts.create);
        }
    }

    #[test]
    fn parse_add_create() {
        let cli = Cli::parse_from(["confpatch", "add", "--create", "app.service", "Unit", "After=network.target"]);
        assert!(matches!(cli.command, Command::Add(EditOpts { create: true, .. })));
    }

    #[test]
    fn set_requires_a_directive() {
        assert!(Cli::try_parse_from(["confpatch", "set", "wg0.conf", "Interface"]).is_err());
    }

    #[test]
    fn parse_apply() {
        let cli = Cli::parse_from(["confpatch", "apply", "plan.toml"]);
        assert!(matches!(cli.command, Command::Apply(_)));
    }

    #[test]
    fn parse_dry_run() {
        let cli = Cli::parse_from(["confpatch", "--dry-run", "apply", "plan.toml"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_dry_run_short_after_subcommand() {
        let cli = Cli::parse_from(["confpatch", "apply", "plan.toml", "-d"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["confpatch", "-v", "check", "a.conf"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["confpatch", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }
}
