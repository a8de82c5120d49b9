//! Ticket command — opens the ticket named by a branch.

use std::io;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::git::{current_branch, Repository};
use crate::opener::{BrowserOpener, PrintOpener, UrlOpener};
use crate::ticket::{Ticket, TicketResolver};

/// Ticket command options.
#[derive(Parser)]
pub struct TicketCommand {
    /// Branch to resolve (defaults to the branch HEAD points at).
    #[arg(value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Prints the ticket URL instead of opening it.
    #[arg(long)]
    pub print: bool,
}

impl TicketCommand {
    /// Executes the ticket command.
    pub fn execute(self, location: &Path, repo: &Repository, resolver: &TicketResolver) -> Result<()> {
        if self.print {
            let mut opener = PrintOpener::new(io::stdout().lock());
            self.run(location, repo, resolver, &mut opener)?;
        } else {
            self.run(location, repo, resolver, &mut BrowserOpener)?;
        }
        Ok(())
    }

    /// Resolves the branch and hands its URL to `opener`.
    ///
    /// Resolution failures are reported on stderr and yield `Ok(None)`; only
    /// failing to determine the branch or to open the URL is an error.
    pub fn run(
        &self,
        location: &Path,
        repo: &Repository,
        resolver: &TicketResolver,
        opener: &mut dyn UrlOpener,
    ) -> Result<Option<Ticket>> {
        let branch = match &self.branch {
            Some(branch) => branch.clone(),
            None => current_branch(location)?,
        };

        match resolver.resolve_branch(repo, &branch) {
            Ok(ticket) => {
                info!(ticket = %ticket.ticket_id, url = %ticket.url, "Resolved ticket");
                opener.open(&ticket.url)?;
                Ok(Some(ticket))
            }
            Err(e) => {
                eprintln!("{e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitConfig;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&mut self, url: &str) -> Result<(), crate::opener::OpenError> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    fn acronis_repo() -> Repository {
        let config = GitConfig::from_entries([
            ("remote.origin.url", "ssh://git@git.acronis.com/team/repo.git"),
            ("remote.mirror.url", "https://gitlab.example.com/team/repo.git"),
            ("branch.ABR-123456-fix-thing.remote", "origin"),
            ("branch.ABR-654321-mirrored.remote", "mirror"),
        ]);
        Repository::build(&config, ["hotfix"])
    }

    fn command(branch: &str) -> TicketCommand {
        TicketCommand {
            branch: Some(branch.to_string()),
            print: false,
        }
    }

    #[test]
    fn opens_resolved_url() -> anyhow::Result<()> {
        let mut opener = RecordingOpener::default();
        let ticket = command("ABR-123456-fix-thing").run(
            Path::new("."),
            &acronis_repo(),
            &TicketResolver::new(),
            &mut opener,
        )?;

        assert_eq!(ticket.map(|t| t.ticket_id).as_deref(), Some("ABR-123456"));
        assert_eq!(
            opener.opened,
            vec!["https://pmc.acronis.com/browse/ABR-123456-fix-thing".to_string()]
        );
        Ok(())
    }

    #[test]
    fn resolution_failures_do_not_open() -> anyhow::Result<()> {
        let repo = acronis_repo();
        let resolver = TicketResolver::new();
        let mut opener = RecordingOpener::default();

        for branch in ["hotfix", "ABR-654321-mirrored", "missing"] {
            let ticket = command(branch).run(Path::new("."), &repo, &resolver, &mut opener)?;
            assert!(ticket.is_none(), "{branch} should not resolve");
        }
        assert!(opener.opened.is_empty());
        Ok(())
    }
}
