use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "file-line",
    about = "Ensure single lines are present in or absent from text files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without writing any file
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Converge every declaration in a manifest
    Apply(ManifestOpts),
    /// Report declarations that are out of sync without writing
    Check(ManifestOpts),
    /// Converge a single declaration given on the command line
    Ensure(EnsureOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Apply(_) => "apply",
            Self::Check(_) => "check",
            Self::Ensure(_) => "ensure",
            Self::Version => "version",
        }
    }
}

/// Options for subcommands that read a manifest.
#[derive(Parser, Debug, Clone)]
pub struct ManifestOpts {
    /// TOML manifest of `[[line]]` declarations
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

/// Options for the `ensure` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EnsureOpts {
    /// Absolute path of the file to manage
    #[arg(long)]
    pub path: String,

    /// Line that should be present (or absent)
    #[arg(long)]
    pub line: String,

    /// Regular expression selecting lines to replace
    #[arg(long = "match", value_name = "REGEX")]
    pub match_pattern: Option<String>,

    /// Regular expression selecting the line to insert after
    #[arg(long, value_name = "REGEX")]
    pub after: Option<String>,

    /// Regular expression; matching lines are left alone
    #[arg(long, value_name = "REGEX")]
    pub unless: Option<String>,

    /// Allow the pattern to match several lines (true or false)
    #[arg(long, value_name = "BOOL")]
    pub multiple: Option<String>,

    /// Do not append when nothing matches (true or false)
    #[arg(long, value_name = "BOOL")]
    pub no_append: Option<String>,

    /// Desired state: present or absent
    #[arg(long, value_name = "STATE")]
    pub ensure: Option<String>,
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
    fn parse_apply() {
        let cli = Cli::parse_from(["file-line", "apply", "lines.toml"]);
        assert!(
            matches!(&cli.command, Command::Apply(opts) if opts.manifest == PathBuf::from("lines.toml"))
        );
        assert!(!cli.global.dry_run);
    }

    #[test]
    fn parse_apply_dry_run_short() {
        let cli = Cli::parse_from(["file-line", "-d", "apply", "lines.toml"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_dry_run_after_subcommand() {
        let cli = Cli::parse_from(["file-line", "apply", "lines.toml", "--dry-run"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["file-line", "check", "/etc/file-line.toml"]);
        assert!(matches!(cli.command, Command::Check(_)));
        assert_eq!(cli.command.name(), "check");
    }

    #[test]
    fn parse_ensure_with_all_options() {
        let cli = Cli::parse_from([
            "file-line",
            "ensure",
            "--path",
            "/etc/sudoers",
            "--line",
            "%wheel ALL=(ALL) ALL",
            "--match",
            "^%wheel",
            "--after",
            "^# User privilege",
            "--unless",
            "NOPASSWD",
            "--multiple",
            "false",
            "--no-append",
            "true",
            "--ensure",
            "present",
        ]);
        assert!(
            matches!(&cli.command, Command::Ensure(_)),
            "Expected Ensure command"
        );
        if let Command::Ensure(opts) = cli.command {
            assert_eq!(opts.path, "/etc/sudoers");
            assert_eq!(opts.match_pattern.as_deref(), Some("^%wheel"));
            assert_eq!(opts.after.as_deref(), Some("^# User privilege"));
            assert_eq!(opts.unless.as_deref(), Some("NOPASSWD"));
            assert_eq!(opts.multiple.as_deref(), Some("false"));
            assert_eq!(opts.no_append.as_deref(), Some("true"));
            assert_eq!(opts.ensure.as_deref(), Some("present"));
        }
    }

    #[test]
    fn parse_ensure_requires_path_and_line() {
        assert!(Cli::try_parse_from(["file-line", "ensure", "--line", "x"]).is_err());
        assert!(Cli::try_parse_from(["file-line", "ensure", "--path", "/x"]).is_err());
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["file-line", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["file-line", "-v", "check", "lines.toml"]);
        assert!(cli.verbose);
    }

    #[test]
    fn apply_requires_manifest() {
        assert!(Cli::try_parse_from(["file-line", "apply"]).is_err());
    }
}
