//! Serializable views of the repository model.

use serde::{Deserialize, Serialize};

use crate::git::{classify_remote, classify_url, Repository};
use crate::ticket::TicketResolver;

pub mod yaml;

pub use yaml::to_yaml;

/// Repository view printed by the `info` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryView {
    /// Version information for the tool.
    pub versions: VersionInfo,
    /// Configured remotes, sorted by name.
    pub remotes: Vec<RemoteView>,
    /// Known branches, sorted by name.
    pub branches: Vec<BranchView>,
}

/// Version information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version of git-ticket.
    pub git_ticket: String,
}

/// A remote and the provider its URL classifies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteView {
    /// Remote name.
    pub name: String,
    /// Remote URL.
    pub url: String,
    /// Fetch refspec.
    pub fetch: String,
    /// Provider category of the URL.
    pub provider: String,
}

/// A branch, its provider and the ticket it resolves to, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchView {
    /// Branch name.
    pub name: String,
    /// Tracked remote, empty when none.
    pub remote: String,
    /// Upstream merge ref, empty when none.
    pub merge: String,
    /// Provider category of the tracked remote.
    pub provider: String,
    /// Ticket URL (only present when the branch names a ticket).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
}

impl RepositoryView {
    /// Builds the view, resolving each branch's ticket with `resolver`.
    pub fn new(repo: &Repository, resolver: &TicketResolver) -> Self {
        let remotes = repo
            .remotes()
            .values()
            .map(|remote| RemoteView {
                name: remote.name.clone(),
                url: remote.url.clone(),
                fetch: remote.fetch.clone(),
                provider: classify_url(&remote.url).to_string(),
            })
            .collect();

        let branches = repo
            .branches()
            .values()
            .map(|branch| {
                let category = classify_remote(repo, &branch.remote);
                BranchView {
                    name: branch.name.clone(),
                    remote: branch.remote.clone(),
                    merge: branch.merge.clone(),
                    provider: category.to_string(),
                    ticket: resolver.resolve(&branch.name, category).ok().map(|t| t.url),
                }
            })
            .collect();

        Self {
            versions: VersionInfo {
                git_ticket: crate::VERSION.to_string(),
            },
            remotes,
            branches,
        }
    }
}
