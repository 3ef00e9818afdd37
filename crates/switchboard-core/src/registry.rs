//! Static registry mapping agent names to ADK server base URLs

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use url::Url;

/// Immutable name → base-URL map, built once at startup and shared read-only.
///
/// Construction is the only mutation; a missing name at lookup time is a
/// caller error, never a registry fault.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<String, String>,
}

impl AgentRegistry {
    /// Build a registry from (name, base URL) pairs, validating every entry.
    ///
    /// Names must be non-empty, URLs must parse with an http or https scheme,
    /// and duplicate names are rejected. Trailing slashes are stripped so
    /// request paths can be appended uniformly.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut agents = HashMap::new();

        for (name, raw_url) in entries {
            if name.trim().is_empty() {
                bail!("agent entry with empty name (url: {})", raw_url);
            }

            let url = Url::parse(&raw_url)
                .with_context(|| format!("invalid base URL for agent '{}': {}", name, raw_url))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!(
                    "agent '{}' has unsupported URL scheme '{}'",
                    name,
                    url.scheme()
                );
            }

            let base = raw_url.trim_end_matches('/').to_string();
            if agents.insert(name.clone(), base).is_some() {
                bail!("duplicate agent name '{}'", name);
            }
        }

        Ok(Self { agents })
    }

    /// Base URL for an agent name, if registered.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.agents.get(name).map(String::as_str)
    }

    /// All registered agent names, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry has no agents at all.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
