//! Git remote URL parsing and hosting-provider classification.

use thiserror::Error;
use tracing::{debug, warn};
use url::{Host, Url};

use crate::git::Repository;
use crate::ticket::{provider_for_host, ProviderCategory};

/// Failure to interpret a remote URL.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RemoteUrlError {
    /// The remote has no URL configured.
    #[error("Remote URL is empty")]
    Empty,

    /// The URL has a scheme but is not a valid URL.
    #[error("Invalid remote URL '{url}': {source}")]
    Invalid {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The scp-like form names a host that cannot be parsed.
    #[error("Invalid host in remote URL '{url}': {source}")]
    InvalidHost {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Components of a remote URL.
///
/// Understands the forms git accepts for a remote:
/// `scheme://[user@]host[:port]/path`, the scp-like `[user@]host:path`, and
/// local paths, which have no host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    /// User name, if one was given.
    pub user: Option<String>,
    /// Host name, absent for local paths.
    pub host: Option<String>,
    /// Repository path on the host.
    pub path: String,
}

impl RemoteUrl {
    /// Parses a remote URL as it appears in `remote.<name>.url`.
    pub fn parse(raw: &str) -> Result<Self, RemoteUrlError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(RemoteUrlError::Empty);
        }

        if raw.contains("://") {
            return Self::parse_scheme_url(raw);
        }

        match scp_parts(raw) {
            Some((user, host, path)) => {
                let host = Host::parse(host).map_err(|source| RemoteUrlError::InvalidHost {
                    url: raw.to_string(),
                    source,
                })?;
                Ok(Self {
                    user: user.map(str::to_string),
                    host: Some(host.to_string()),
                    path: path.to_string(),
                })
            }
            None => Ok(Self {
                user: None,
                host: None,
                path: raw.to_string(),
            }),
        }
    }

    fn parse_scheme_url(raw: &str) -> Result<Self, RemoteUrlError> {
        let url = Url::parse(raw).map_err(|source| RemoteUrlError::Invalid {
            url: raw.to_string(),
            source,
        })?;

        let user = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .map(str::to_string);

        Ok(Self {
            user,
            host,
            path: url.path().to_string(),
        })
    }

    /// Returns the lower-cased host name, if any.
    pub fn hostname(&self) -> Option<String> {
        self.host.as_deref().map(str::to_ascii_lowercase)
    }
}

/// Splits an scp-like `[user@]host:path` into its parts.
///
/// Returns `None` for local paths: no colon, a slash before the first
/// colon, or a single-letter drive prefix.
fn scp_parts(raw: &str) -> Option<(Option<&str>, &str, &str)> {
    if raw.starts_with(['/', '.', '~']) {
        return None;
    }
    let (authority, path) = raw.split_once(':')?;
    if authority.contains('/') || authority.is_empty() {
        return None;
    }
    if authority.len() == 1 && authority.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    match authority.rsplit_once('@') {
        Some((user, host)) => Some((Some(user), host, path)),
        None => Some((None, authority, path)),
    }
}

/// Classifies a remote URL into a provider category.
///
/// Unparseable URLs and URLs without a host are `Unknown`; the parse failure
/// is logged but never fatal.
pub fn classify_url(raw: &str) -> ProviderCategory {
    let remote_url = match RemoteUrl::parse(raw) {
        Ok(remote_url) => remote_url,
        Err(e) => {
            warn!("{e}");
            return ProviderCategory::Unknown;
        }
    };

    let Some(hostname) = remote_url.hostname() else {
        debug!(url = raw, "Remote URL has no host");
        return ProviderCategory::Unknown;
    };

    match provider_for_host(&hostname) {
        Some(provider) => ProviderCategory::Known(provider),
        None => {
            debug!(host = %hostname, "Host is not a registered provider");
            ProviderCategory::Unknown
        }
    }
}

/// Classifies the remote a branch tracks.
///
/// An empty remote name means the branch has no upstream and yields
/// `Unset`.
pub fn classify_remote(repo: &Repository, remote_name: &str) -> ProviderCategory {
    if remote_name.is_empty() {
        return ProviderCategory::Unset;
    }

    match repo.remote(remote_name) {
        Some(remote) => classify_url(&remote.url),
        None => {
            warn!(remote = remote_name, "Remote is not configured");
            ProviderCategory::Unknown
        }
    }
}
