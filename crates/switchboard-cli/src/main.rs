use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::SwitchboardConfig;
use switchboard_core::{AdkClient, AgentRegistry, final_response};
use switchboard_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "switchboard")]
#[command(version)]
#[command(about = "Switchboard, an HTTP gateway that routes chat requests to ADK agents")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Start,

    /// Send a one-shot message to a registered agent
    Ask {
        /// The agent to route to
        agent: String,

        /// The message to send
        message: String,

        /// User id for the upstream session
        #[arg(short, long, default_value = "cli")]
        user: String,
    },

    /// Initialize config directory and default config
    Init,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Init => cmd_init().await,
        Commands::Config => cmd_config(&cli.config).await,
        Commands::Start => cmd_start(&cli.config).await,
        Commands::Ask {
            agent,
            message,
            user,
        } => cmd_ask(&cli.config, &agent, &message, &user).await,
    }
}

async fn cmd_init() -> Result<()> {
    let config_dir = config::config_dir();
    tokio::fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create config dir: {}", config_dir.display()))?;

    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        warn!("Config already exists at {}", config_path.display());
    } else {
        let default_config = include_str!("../../../config/default.toml");
        tokio::fs::write(&config_path, default_config).await?;
        info!("Created default config at {}", config_path.display());
    }

    println!("Switchboard initialized at {}", config_dir.display());
    println!(
        "Edit {} to register your agents.",
        config_path.display()
    );
    Ok(())
}

async fn cmd_config(config_path: &Option<PathBuf>) -> Result<()> {
    let cfg = SwitchboardConfig::load(config_path)?;
    println!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}

async fn cmd_start(config_path: &Option<PathBuf>) -> Result<()> {
    let cfg = SwitchboardConfig::load(config_path)?;
    info!("Starting switchboard gateway...");

    let registry = build_registry(&cfg)?;
    let client = AdkClient::with_timeouts(
        Duration::from_secs(cfg.upstream.session_timeout_secs),
        Duration::from_secs(cfg.upstream.run_timeout_secs),
    );

    let bind: SocketAddr = format!("{}:{}", cfg.gateway.bind, cfg.gateway.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address {}:{}",
                cfg.gateway.bind, cfg.gateway.port
            )
        })?;

    let server = GatewayServer::new(bind, registry, client, cfg.gateway.reuse_sessions);
    let mut server_handle = server.spawn();

    println!("Switchboard is running on http://{}. Press Ctrl+C to stop.", bind);

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            server_handle.abort();
        }
        result = &mut server_handle => {
            result.context("Gateway task panicked")??;
        }
    }

    println!("Switchboard stopped.");
    Ok(())
}

async fn cmd_ask(
    config_path: &Option<PathBuf>,
    agent: &str,
    message: &str,
    user: &str,
) -> Result<()> {
    let cfg = SwitchboardConfig::load(config_path)?;

    let registry = build_registry(&cfg)?;
    let base_url = registry
        .lookup(agent)
        .with_context(|| format!("agent '{}' is not registered", agent))?;

    let client = AdkClient::with_timeouts(
        Duration::from_secs(cfg.upstream.session_timeout_secs),
        Duration::from_secs(cfg.upstream.run_timeout_secs),
    );

    let session_id = client.create_session(base_url, agent, user).await?;
    let events = client
        .run_turn(base_url, agent, user, &session_id, message)
        .await?;

    println!("{}", final_response(&events));
    Ok(())
}

fn build_registry(cfg: &SwitchboardConfig) -> Result<AgentRegistry> {
    let registry = AgentRegistry::from_entries(
        cfg.agents.iter().map(|a| (a.name.clone(), a.url.clone())),
    )
    .context("Invalid [[agents]] entries in config")?;

    if registry.is_empty() {
        warn!("No agents registered. Add [[agents]] entries to the config.");
    }

    Ok(registry)
}
