//! Git repository inspection: config parsing, remotes and branches.

pub mod config;
pub mod error;
pub mod remote;
pub mod repository;

pub use config::GitConfig;
pub use error::RepoError;
pub use remote::{classify_remote, classify_url, RemoteUrl, RemoteUrlError};
pub use repository::{current_branch, list_local_branch_refs, Branch, Remote, Repository};

/// Name of the git metadata directory inside a working tree.
pub const GIT_DIR: &str = ".git";

/// Path of the repository config file relative to the git directory.
pub const CONFIG_FILE: &str = "config";

/// Path of the HEAD pointer file relative to the git directory.
pub const HEAD_FILE: &str = "HEAD";

/// Path of the local branch refs directory relative to the git directory.
pub const REFS_HEADS_DIR: &str = "refs/heads";

/// Prefix of a symbolic HEAD pointing at a local branch.
pub const HEAD_REF_PREFIX: &str = "ref: refs/heads/";
