//! Errors raised while loading a repository model.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or parsing repository metadata.
///
/// All of these abort the invocation: no command can run without a model.
#[derive(Error, Debug)]
pub enum RepoError {
    /// No git config file at the expected location.
    #[error("Location is not a valid git repository: {} not found", path.display())]
    RepoNotFound {
        /// Path that was probed for the config file.
        path: PathBuf,
    },

    /// The config file is not valid git-config syntax.
    #[error("Failed to parse git config {}: {message}", path.display())]
    ConfigParse {
        /// Config file that failed to parse.
        path: PathBuf,
        /// Parser message, including line and column context.
        message: String,
    },

    /// Any filesystem failure other than a missing config file.
    #[error("Failed to access {}", path.display())]
    Io {
        /// Path being read or listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// HEAD does not point at a local branch.
    #[error("Repository is in detached HEAD state; pass a branch name explicitly")]
    DetachedHead,
}

impl RepoError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RepoNotFound { .. } => 42,
            Self::ConfigParse { .. } => 43,
            Self::Io { .. } => 44,
            Self::DetachedHead => 1,
        }
    }
}
