//! Ticket resolution: from branch name and hosting provider to a ticket URL.

pub mod error;
pub mod provider;
pub mod resolver;

pub use error::ResolveError;
pub use provider::{provider_for_host, rule_for, ProviderCategory, ProviderId, TicketRule};
pub use resolver::{Ticket, TicketResolver};
