//! Hosting providers and their ticket rules.
//!
//! Both tables are fixed at compile time; there is no runtime registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Hosting providers the tool knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Acronis self-hosted git, tickets in the Acronis PMC tracker.
    Acronis,
    /// GitHub.
    Github,
}

impl ProviderId {
    /// Returns all known providers.
    pub fn all() -> &'static [ProviderId] {
        &[ProviderId::Acronis, ProviderId::Github]
    }

    /// Returns the provider name used in settings and output.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderId::Acronis => "acronis",
            ProviderId::Github => "github",
        }
    }

    /// Parses a provider name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "acronis" => Some(ProviderId::Acronis),
            "github" => Some(ProviderId::Github),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classification of a branch's remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderCategory {
    /// The remote's host is a registered provider.
    Known(ProviderId),
    /// The branch declares no remote.
    Unset,
    /// A remote is declared but its host is not registered, or its URL
    /// could not be parsed.
    Unknown,
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderCategory::Known(id) => write!(f, "{id}"),
            ProviderCategory::Unset => write!(f, "unset"),
            ProviderCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Host name to provider table.
const PROVIDER_HOSTS: &[(&str, ProviderId)] = &[
    ("git.acronis.com", ProviderId::Acronis),
    ("github.com", ProviderId::Github),
];

/// Looks up the provider serving `host`. Matching ignores ASCII case.
pub fn provider_for_host(host: &str) -> Option<ProviderId> {
    PROVIDER_HOSTS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(host))
        .map(|(_, provider)| *provider)
}

/// How to find a ticket in a branch name and where that ticket lives.
#[derive(Debug)]
pub struct TicketRule {
    /// Pattern whose first capture group is the ticket id.
    pub pattern: Regex,
    /// Destination URL with a single `{}` slot.
    pub url_template: &'static str,
}

impl TicketRule {
    /// Fills the template's slot with `value`.
    pub fn format_url(&self, value: &str) -> String {
        self.url_template.replacen("{}", value, 1)
    }
}

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static TICKET_RULES: LazyLock<HashMap<ProviderId, TicketRule>> = LazyLock::new(|| {
    HashMap::from([(
        ProviderId::Acronis,
        TicketRule {
            pattern: Regex::new(r"(ABR-[0-9]{6})").unwrap(),
            url_template: "https://pmc.acronis.com/browse/{}",
        },
    )])
});

/// Returns the ticket rule registered for `provider`, if any.
pub fn rule_for(provider: ProviderId) -> Option<&'static TicketRule> {
    TICKET_RULES.get(&provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_round_trip() {
        for provider in ProviderId::all() {
            assert_eq!(ProviderId::parse(provider.name()), Some(*provider));
        }
        assert_eq!(ProviderId::parse(" GitHub "), Some(ProviderId::Github));
        assert_eq!(ProviderId::parse("gitlab"), None);
    }

    #[test]
    fn host_lookup() {
        assert_eq!(provider_for_host("github.com"), Some(ProviderId::Github));
        assert_eq!(provider_for_host("GIT.ACRONIS.COM"), Some(ProviderId::Acronis));
        assert_eq!(provider_for_host("gitlab.example.com"), None);
        assert_eq!(provider_for_host(""), None);
    }

    #[test]
    fn acronis_rule_present_github_absent() {
        assert!(rule_for(ProviderId::Acronis).is_some());
        assert!(rule_for(ProviderId::Github).is_none());
    }

    #[test]
    fn format_url_fills_single_slot() {
        let rule = rule_for(ProviderId::Acronis).map(|r| r.format_url("ABR-000001"));
        assert_eq!(
            rule.as_deref(),
            Some("https://pmc.acronis.com/browse/ABR-000001")
        );
    }

    #[test]
    fn category_display() {
        assert_eq!(ProviderCategory::Known(ProviderId::Github).to_string(), "github");
        assert_eq!(ProviderCategory::Unset.to_string(), "unset");
        assert_eq!(ProviderCategory::Unknown.to_string(), "unknown");
    }
}
