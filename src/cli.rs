//! CLI interface for git-ticket.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::git::{RepoError, Repository};
use crate::opener::OpenError;
use crate::ticket::TicketResolver;
use crate::utils::Settings;

pub mod info;
pub mod ticket;

pub use info::InfoCommand;
pub use ticket::TicketCommand;

/// git-ticket: open the issue-tracker ticket named by a git branch.
#[derive(Parser)]
#[command(name = "git-ticket")]
#[command(about = "Open the ticket embedded in a git branch name", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enables verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working tree of the repository to inspect.
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".", global = true)]
    pub repo: PathBuf,

    /// The command to execute (defaults to `info`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Prints the repository's remotes and branches as YAML.
    Info(InfoCommand),
    /// Opens the ticket for a branch (defaults to the current branch).
    Ticket(TicketCommand),
}

impl Cli {
    /// Executes the CLI command.
    ///
    /// The repository model is loaded before dispatch; failing to load it
    /// aborts every command.
    pub fn execute(self) -> Result<()> {
        let repo = Repository::load(&self.repo)?;
        let settings = Settings::load()?;
        let resolver = TicketResolver::with_default_provider(settings.default_provider()?);

        match self.command {
            None => InfoCommand::default().execute(&repo, &resolver),
            Some(Commands::Info(info_cmd)) => info_cmd.execute(&repo, &resolver),
            Some(Commands::Ticket(ticket_cmd)) => ticket_cmd.execute(&self.repo, &repo, &resolver),
        }
    }
}

/// Maps a failed run to its process exit code.
///
/// The first `RepoError` or `OpenError` found anywhere in the chain decides
/// the code; anything else exits with 1.
pub fn exit_code(e: &anyhow::Error) -> i32 {
    e.chain()
        .find_map(|cause| {
            cause
                .downcast_ref::<RepoError>()
                .map(RepoError::exit_code)
                .or_else(|| cause.downcast_ref::<OpenError>().map(OpenError::exit_code))
        })
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;

    #[test]
    fn parses_ticket_with_branch() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["git-ticket", "-v", "ticket", "ABR-123456-x", "--print"])?;

        assert!(cli.verbose);
        assert_eq!(cli.repo, PathBuf::from("."));
        match cli.command {
            Some(Commands::Ticket(cmd)) => {
                assert_eq!(cmd.branch.as_deref(), Some("ABR-123456-x"));
                assert!(cmd.print);
            }
            _ => anyhow::bail!("expected ticket command"),
        }
        Ok(())
    }

    #[test]
    fn parses_without_command() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["git-ticket", "--repo", "/tmp/work"])?;

        assert!(!cli.verbose);
        assert_eq!(cli.repo, PathBuf::from("/tmp/work"));
        assert!(cli.command.is_none());
        Ok(())
    }

    #[test]
    fn ticket_branch_is_optional() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["git-ticket", "ticket"])?;
        match cli.command {
            Some(Commands::Ticket(cmd)) => assert!(cmd.branch.is_none() && !cmd.print),
            _ => anyhow::bail!("expected ticket command"),
        }
        Ok(())
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Cli::try_parse_from(["git-ticket", "frobnicate"]).is_err());
    }

    #[test]
    fn command_names_are_case_sensitive() {
        assert!(Cli::try_parse_from(["git-ticket", "INFO"]).is_err());
        assert!(Cli::try_parse_from(["git-ticket", "Ticket"]).is_err());
    }

    // ── exit_code ────────────────────────────────────────────────────

    #[test]
    fn exit_code_for_repo_errors() {
        let not_found = anyhow::Error::from(RepoError::RepoNotFound {
            path: PathBuf::from("/nowhere/.git/config"),
        });
        let parse = anyhow::Error::from(RepoError::ConfigParse {
            path: PathBuf::from("<text>"),
            message: "unexpected end of file".to_string(),
        });
        let io_failure = anyhow::Error::from(RepoError::Io {
            path: PathBuf::from(".git/refs/heads"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });

        assert_eq!(exit_code(&not_found), 42);
        assert_eq!(exit_code(&parse), 43);
        assert_eq!(exit_code(&io_failure), 44);
        assert_eq!(exit_code(&anyhow::Error::from(RepoError::DetachedHead)), 1);
    }

    #[test]
    fn exit_code_for_open_error() {
        let err = anyhow::Error::from(OpenError {
            url: "https://pmc.acronis.com/browse/ABR-000001".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        assert_eq!(exit_code(&err), 45);
    }

    #[test]
    fn exit_code_sees_through_context() {
        let result: Result<()> = Err(RepoError::RepoNotFound {
            path: PathBuf::from("/nowhere/.git/config"),
        })
        .context("Failed to load repository");

        let err = result.err();
        assert_eq!(err.as_ref().map(exit_code), Some(42));
    }

    #[test]
    fn exit_code_defaults_to_one() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json")?;

        let settings = Settings::load_from_path(&path);
        assert_eq!(settings.err().as_ref().map(exit_code), Some(1));
        assert_eq!(exit_code(&anyhow::anyhow!("something else")), 1);
        Ok(())
    }
}
