//! # git-ticket
//!
//! Opens the issue-tracker ticket named by a git branch.
//!
//! The repository's `.git/config` and local branch refs are read into a
//! [`git::Repository`] model. A branch's remote URL is classified into a
//! hosting provider, and the provider's ticket rule turns the branch name
//! into a ticket URL.
//!
//! ## Quick Start
//!
//! ```rust
//! use git_ticket::git::{GitConfig, Repository};
//! use git_ticket::ticket::TicketResolver;
//!
//! let config = GitConfig::from_entries([
//!     ("remote.origin.url", "ssh://git@git.acronis.com/team/repo.git"),
//!     ("branch.ABR-123456-fix-thing.remote", "origin"),
//! ]);
//! let repo = Repository::build(&config, Vec::<String>::new());
//!
//! let ticket = TicketResolver::new()
//!     .resolve_branch(&repo, "ABR-123456-fix-thing")
//!     .unwrap();
//! assert_eq!(ticket.url, "https://pmc.acronis.com/browse/ABR-123456-fix-thing");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod git;
pub mod opener;
pub mod ticket;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of git-ticket.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
