//! Branch name to ticket URL resolution.

use tracing::{debug, info};

use crate::git::{classify_remote, Repository};
use crate::ticket::{rule_for, ProviderCategory, ProviderId, ResolveError};

/// A ticket found in a branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Branch the ticket was found in.
    pub branch: String,
    /// Provider whose rule matched.
    pub provider: ProviderId,
    /// Ticket id captured by the provider's pattern.
    pub ticket_id: String,
    /// Destination URL.
    pub url: String,
}

/// Resolves branch names to ticket URLs.
///
/// Branches without a remote are assumed to belong to the default provider.
#[derive(Debug, Clone, Copy)]
pub struct TicketResolver {
    default_provider: ProviderId,
}

impl Default for TicketResolver {
    fn default() -> Self {
        Self {
            default_provider: ProviderId::Acronis,
        }
    }
}

impl TicketResolver {
    /// Creates a resolver with the built-in default provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that treats remote-less branches as `provider`.
    pub fn with_default_provider(provider: ProviderId) -> Self {
        Self {
            default_provider: provider,
        }
    }

    /// Returns the provider assumed for branches without a remote.
    pub fn default_provider(&self) -> ProviderId {
        self.default_provider
    }

    /// Looks up `branch` in `repo`, classifies its remote and resolves it.
    pub fn resolve_branch(&self, repo: &Repository, branch: &str) -> Result<Ticket, ResolveError> {
        let Some(found) = repo.branch(branch) else {
            return Err(ResolveError::BranchNotFound(branch.to_string()));
        };

        let category = classify_remote(repo, &found.remote);
        self.resolve(branch, category)
    }

    /// Resolves `branch` under an already-classified provider category.
    ///
    /// The whole branch name is substituted into the URL template, not just
    /// the captured ticket id.
    pub fn resolve(&self, branch: &str, category: ProviderCategory) -> Result<Ticket, ResolveError> {
        let provider = match category {
            ProviderCategory::Known(provider) => provider,
            ProviderCategory::Unset => {
                info!(
                    default = %self.default_provider,
                    "Remote not set, assuming the default provider"
                );
                self.default_provider
            }
            ProviderCategory::Unknown => {
                return Err(ResolveError::NoRuleForProvider {
                    branch: branch.to_string(),
                    category,
                });
            }
        };
        info!("Branch {branch} remote type is {provider}");

        let Some(rule) = rule_for(provider) else {
            return Err(ResolveError::NoRuleForProvider {
                branch: branch.to_string(),
                category: ProviderCategory::Known(provider),
            });
        };

        let ticket_id = rule
            .pattern
            .captures(branch)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ResolveError::NoTicketInBranchName {
                branch: branch.to_string(),
            })?;
        debug!(ticket = %ticket_id, "Extracted ticket from branch name");

        Ok(Ticket {
            branch: branch.to_string(),
            provider,
            ticket_id,
            url: rule.format_url(branch),
        })
    }
}
