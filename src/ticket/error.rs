//! Ticket resolution errors.

use thiserror::Error;

use crate::ticket::ProviderCategory;

/// Reasons a branch could not be turned into a ticket URL.
///
/// None of these are fatal: the `ticket` command reports them and exits
/// cleanly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested branch is neither configured nor present on disk.
    #[error("Branch {0} not found")]
    BranchNotFound(String),

    /// No ticket rule exists for the branch's provider.
    #[error(
        "Do not know how to open a ticket for branch {branch}: no ticket rule for provider {category}"
    )]
    NoRuleForProvider {
        /// Branch being resolved.
        branch: String,
        /// Category the branch's remote classified to.
        category: ProviderCategory,
    },

    /// The branch name does not contain a ticket for its provider.
    #[error("Branch {branch} does not have an associated ticket or is not formed correctly")]
    NoTicketInBranchName {
        /// Branch being resolved.
        branch: String,
    },
}
