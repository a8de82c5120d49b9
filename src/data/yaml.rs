//! YAML output

use anyhow::{Context, Result};
use serde::Serialize;

/// Serializes a view to a YAML document.
///
/// Fields whose value is `None` and marked `skip_serializing_if` are left out
/// entirely, so a missing key means "not applicable" rather than null.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}
