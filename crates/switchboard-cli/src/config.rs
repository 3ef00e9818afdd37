use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchboardConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
}

// ── Gateway Config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Honor caller-supplied session ids instead of minting one per turn.
    #[serde(default)]
    pub reuse_sessions: bool,
}

fn default_gateway_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
            port: default_gateway_port(),
            reuse_sessions: false,
        }
    }
}

// ── Upstream Config ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,
}

fn default_session_timeout_secs() -> u64 {
    10
}

fn default_run_timeout_secs() -> u64 {
    60
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: default_session_timeout_secs(),
            run_timeout_secs: default_run_timeout_secs(),
        }
    }
}

// ── Agent Entries ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    pub name: String,
    pub url: String,
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".switchboard")
}

impl SwitchboardConfig {
    pub fn load(custom_path: &Option<PathBuf>) -> Result<Self> {
        let path = custom_path
            .clone()
            .unwrap_or_else(|| config_dir().join("config.toml"));

        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read config at {}. Run `switchboard init` first.",
                path.display()
            )
        })?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gets_defaults() {
        let cfg: SwitchboardConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.gateway.bind, "127.0.0.1");
        assert_eq!(cfg.gateway.port, 8080);
        assert!(!cfg.gateway.reuse_sessions);
        assert_eq!(cfg.upstream.session_timeout_secs, 10);
        assert_eq!(cfg.upstream.run_timeout_secs, 60);
        assert!(cfg.agents.is_empty());
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        let cfg: SwitchboardConfig = toml::from_str(
            r#"
            [gateway]
            port = 9090
            "#,
        )
        .unwrap();
        assert_eq!(cfg.gateway.bind, "127.0.0.1");
        assert_eq!(cfg.gateway.port, 9090);
    }

    #[test]
    fn test_full_config_parses() {
        let cfg: SwitchboardConfig = toml::from_str(
            r#"
            [gateway]
            bind = "0.0.0.0"
            port = 7000
            reuse_sessions = true

            [upstream]
            session_timeout_secs = 5
            run_timeout_secs = 30

            [[agents]]
            name = "calc_agent"
            url = "http://localhost:8000"

            [[agents]]
            name = "greeting_agent"
            url = "http://localhost:8001"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.gateway.bind, "0.0.0.0");
        assert!(cfg.gateway.reuse_sessions);
        assert_eq!(cfg.upstream.run_timeout_secs, 30);
        assert_eq!(cfg.agents.len(), 2);
        assert_eq!(cfg.agents[0].name, "calc_agent");
        assert_eq!(cfg.agents[1].url, "http://localhost:8001");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [[agents]]
            name = "calc_agent"
            url = "http://localhost:8000"
            "#,
        )
        .unwrap();

        let cfg = SwitchboardConfig::load(&Some(path)).unwrap();
        assert_eq!(cfg.agents.len(), 1);
        assert_eq!(cfg.gateway.port, 8080);
    }

    #[test]
    fn test_load_missing_file_mentions_init() {
        let err = SwitchboardConfig::load(&Some(PathBuf::from("/nonexistent/config.toml")))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("switchboard init"));
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let rendered = toml::to_string_pretty(&SwitchboardConfig::default()).unwrap();
        let parsed: SwitchboardConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.gateway.port, 8080);
        assert_eq!(parsed.upstream.session_timeout_secs, 10);
    }
}
