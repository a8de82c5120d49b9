//! Git config parsing.
//!
//! Parsing itself is delegated to libgit2. The result is flattened into
//! dotted keys (`remote.origin.url`) and indexed once into a
//! section/subsection/variable tree so callers never re-split key strings.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::git::RepoError;

type Variables = BTreeMap<String, String>;

/// Path reported in parse errors for config text parsed from memory.
const TEXT_SOURCE: &str = "<text>";

/// Parsed contents of a single git config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    entries: BTreeMap<String, String>,
    sections: BTreeMap<String, BTreeMap<String, Variables>>,
}

impl GitConfig {
    /// Parses the config file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, RepoError> {
        let parse_error = |e: git2::Error| RepoError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        };

        let config = git2::Config::open(path).map_err(parse_error)?;
        let mut entries = config.entries(None).map_err(parse_error)?;

        let mut pairs = Vec::new();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(parse_error)?;
            let name = String::from_utf8_lossy(entry.name_bytes()).into_owned();
            // Only variables written in this file count; `include.path` stays
            // a plain key but the files it names are not merged in.
            if entry.include_depth() > 0 {
                debug!(key = %name, "Skipping variable from included config");
                continue;
            }
            // A bare variable without `=` is an implicit boolean.
            let value = if entry.has_value() {
                String::from_utf8_lossy(entry.value_bytes()).into_owned()
            } else {
                "true".to_string()
            };
            pairs.push((name, value));
        }

        debug!(path = %path.display(), entries = pairs.len(), "Parsed git config");
        Ok(Self::from_entries(pairs))
    }

    /// Parses config text held in memory.
    ///
    /// libgit2 only reads config from disk, so the text is staged through a
    /// temporary file first.
    pub fn parse(text: &str) -> Result<Self, RepoError> {
        let io_error = |source: std::io::Error| RepoError::Io {
            path: std::env::temp_dir(),
            source,
        };

        let mut staged = tempfile::NamedTempFile::new().map_err(io_error)?;
        staged.write_all(text.as_bytes()).map_err(io_error)?;
        staged.flush().map_err(io_error)?;

        let staged_path = staged.path().display().to_string();
        Self::from_file(staged.path()).map_err(|err| match err {
            RepoError::ConfigParse { message, .. } => RepoError::ConfigParse {
                path: PathBuf::from(TEXT_SOURCE),
                message: message.replace(&staged_path, TEXT_SOURCE),
            },
            other => other,
        })
    }

    /// Builds a config from already-parsed `(key, value)` pairs.
    ///
    /// Section and variable names are lower-cased, subsection names are kept
    /// as written. A repeated key keeps its last value.
    pub fn from_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            let Some((section, subsection, variable)) = split_key(key.as_ref()) else {
                debug!(key = key.as_ref(), "Skipping config key without a section");
                continue;
            };
            let section = section.to_lowercase();
            let variable = variable.to_lowercase();
            let value = value.into();

            let full_key = if subsection.is_empty() {
                format!("{section}.{variable}")
            } else {
                format!("{section}.{subsection}.{variable}")
            };
            config.entries.insert(full_key, value.clone());
            config
                .sections
                .entry(section)
                .or_default()
                .entry(subsection.to_string())
                .or_default()
                .insert(variable, value);
        }
        config
    }

    /// Returns the value of a fully-qualified dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let (section, subsection, variable) = split_key(key)?;
        self.value(&section.to_lowercase(), subsection, &variable.to_lowercase())
    }

    /// Returns the value of `section.subsection.variable`.
    pub fn value(&self, section: &str, subsection: &str, variable: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(subsection)?
            .get(variable)
            .map(String::as_str)
    }

    /// Returns the subsection names declared under `section`, in key order.
    pub fn subsections<'a>(&'a self, section: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(BTreeMap::keys)
            .filter(|name| !name.is_empty())
            .map(String::as_str)
    }

    /// Returns the flat dotted-key view of the config.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Returns true when the config holds no variables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits `section.subsection.variable` into its three parts.
///
/// The subsection is everything between the first and the last dot, so
/// subsections may themselves contain dots. Keys with a single dot have an
/// empty subsection.
fn split_key(key: &str) -> Option<(&str, &str, &str)> {
    let (section, rest) = key.split_once('.')?;
    match rest.rsplit_once('.') {
        Some((subsection, variable)) => Some((section, subsection, variable)),
        None => Some((section, "", rest)),
    }
}
