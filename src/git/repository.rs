//! Repository model built from git config and local branch refs.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::git::{
    GitConfig, RepoError, CONFIG_FILE, GIT_DIR, HEAD_FILE, HEAD_REF_PREFIX, REFS_HEADS_DIR,
};

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    /// Name of the remote (e.g., "origin", "upstream").
    pub name: String,
    /// URL of the remote repository; empty when unset.
    pub url: String,
    /// Fetch refspec; empty when unset.
    pub fetch: String,
}

/// A local branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name.
    pub name: String,
    /// Remote the branch tracks; empty when none.
    pub remote: String,
    /// Upstream ref the branch merges from; empty when none.
    pub merge: String,
}

/// Remotes and branches of a repository.
///
/// Built once and never modified. Names are unique and the first source to
/// declare a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    remotes: BTreeMap<String, Remote>,
    branches: BTreeMap<String, Branch>,
}

impl Repository {
    /// Loads the repository whose working tree is at `location`.
    pub fn load<P: AsRef<Path>>(location: P) -> Result<Self, RepoError> {
        let git_dir = location.as_ref().join(GIT_DIR);
        let config_path = git_dir.join(CONFIG_FILE);

        match fs::metadata(&config_path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepoError::RepoNotFound { path: config_path });
            }
            Err(source) => {
                return Err(RepoError::Io {
                    path: config_path,
                    source,
                });
            }
        }

        let config = GitConfig::from_file(&config_path)?;
        let branch_refs = list_local_branch_refs(&git_dir)?;

        let repo = Self::build(&config, branch_refs);
        debug!(
            remotes = repo.remotes.len(),
            branches = repo.branches.len(),
            "Loaded repository model"
        );
        Ok(repo)
    }

    /// Builds the model from parsed config and the names of local branch refs.
    ///
    /// Config-declared remotes and branches are inserted first; branch refs
    /// only add branches the config does not already declare.
    pub fn build<I, S>(config: &GitConfig, branch_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut repo = Self::default();

        for name in config.subsections("remote") {
            if repo.remotes.contains_key(name) {
                continue;
            }
            let remote = Remote {
                name: name.to_string(),
                url: config.value("remote", name, "url").unwrap_or_default().to_string(),
                fetch: config.value("remote", name, "fetch").unwrap_or_default().to_string(),
            };
            repo.remotes.insert(name.to_string(), remote);
        }

        for name in config.subsections("branch") {
            if repo.branches.contains_key(name) {
                continue;
            }
            let branch = Branch {
                name: name.to_string(),
                remote: config.value("branch", name, "remote").unwrap_or_default().to_string(),
                merge: config.value("branch", name, "merge").unwrap_or_default().to_string(),
            };
            repo.branches.insert(name.to_string(), branch);
        }

        for name in branch_refs {
            let name = name.into();
            repo.branches.entry(name.clone()).or_insert_with(|| Branch {
                name,
                remote: String::new(),
                merge: String::new(),
            });
        }

        repo
    }

    /// Returns the remote called `name`.
    pub fn remote(&self, name: &str) -> Option<&Remote> {
        self.remotes.get(name)
    }

    /// Returns the branch called `name`.
    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name)
    }

    /// Returns all remotes keyed by name.
    pub fn remotes(&self) -> &BTreeMap<String, Remote> {
        &self.remotes
    }

    /// Returns all branches keyed by name.
    pub fn branches(&self) -> &BTreeMap<String, Branch> {
        &self.branches
    }
}

/// Lists the branch ref files directly under `<git_dir>/refs/heads`.
///
/// Directories are skipped, as is any entry named `HEAD` in any case.
/// Names are returned sorted.
pub fn list_local_branch_refs(git_dir: &Path) -> Result<Vec<String>, RepoError> {
    let heads_dir = git_dir.join(REFS_HEADS_DIR);
    let io_error = |source: io::Error| RepoError::Io {
        path: heads_dir.clone(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(&heads_dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.file_type().map_err(io_error)?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.eq_ignore_ascii_case("HEAD") {
            continue;
        }
        names.push(name);
    }
    names.sort();

    Ok(names)
}

/// Returns the branch HEAD points at in the working tree at `location`.
pub fn current_branch<P: AsRef<Path>>(location: P) -> Result<String, RepoError> {
    let head_path: PathBuf = location.as_ref().join(GIT_DIR).join(HEAD_FILE);
    let content = fs::read_to_string(&head_path).map_err(|source| RepoError::Io {
        path: head_path.clone(),
        source,
    })?;

    let branch = content
        .strip_prefix(HEAD_REF_PREFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(RepoError::DetachedHead)?;

    debug!("Branch is: {branch}");
    Ok(branch.to_string())
}
