//! Info command — prints the repository model as YAML.

use anyhow::Result;
use clap::Parser;

use crate::data::{to_yaml, RepositoryView};
use crate::git::Repository;
use crate::ticket::TicketResolver;

/// Info command options.
#[derive(Parser, Default)]
pub struct InfoCommand {}

impl InfoCommand {
    /// Executes the info command.
    pub fn execute(self, repo: &Repository, resolver: &TicketResolver) -> Result<()> {
        let yaml_output = to_yaml(&RepositoryView::new(repo, resolver))?;
        println!("{yaml_output}");
        Ok(())
    }
}
