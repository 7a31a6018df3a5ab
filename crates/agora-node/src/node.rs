//! Agora Node - the main application entry point.
//!
//! Architecture:
//! - Single daemon process with shared RocksDB-backed report storage
//! - Density engine invoked synchronously per incoming update
//! - HTTP API for clients (updates, active users, crowd history)
//! - Detached alert dispatcher feeding WebSocket sessions

use crate::alerts::{Alert, AlertDispatcher, AlertHandle};
use crate::api;
use crate::error::Result;
use crate::storage::Storage;
use agora_density::{CrowdMonitor, DensityConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Configuration for an Agora node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Data directory for storage
    pub data_dir: PathBuf,

    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Density engine tuning (radius, window, zone cutoffs)
    pub density: DensityConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// Density settings fall back to the engine defaults; each can be
    /// overridden independently.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("AGORA_DATA_DIR").unwrap_or_else(|_| "./agora-data".to_string()),
        );

        let api_addr = std::env::var("AGORA_API_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid AGORA_API_ADDR");

        let mut density = DensityConfig::default();
        if let Ok(v) = std::env::var("AGORA_CROWD_RADIUS_M") {
            density.radius_m = v.parse().expect("Invalid AGORA_CROWD_RADIUS_M");
        }
        if let Ok(v) = std::env::var("AGORA_ACTIVE_WINDOW_SECS") {
            let secs: u64 = v.parse().expect("Invalid AGORA_ACTIVE_WINDOW_SECS");
            density.active_window = Duration::from_secs(secs);
        }
        if let Ok(v) = std::env::var("AGORA_MEDIUM_OVER") {
            density.medium_over = v.parse().expect("Invalid AGORA_MEDIUM_OVER");
        }
        if let Ok(v) = std::env::var("AGORA_HEAVY_OVER") {
            density.heavy_over = v.parse().expect("Invalid AGORA_HEAVY_OVER");
        }

        Self {
            data_dir,
            api_addr,
            density,
        }
    }
}

/// Shared state for the node - single storage instance shared by all
/// handlers, one monitor wired to the alert dispatcher.
pub struct NodeState {
    pub storage: Arc<Storage>,
    pub monitor: CrowdMonitor<Arc<Storage>, AlertHandle>,
    pub alerts: broadcast::Sender<Alert>,
    pub config: NodeConfig,
}

/// An Agora node instance.
pub struct AgoraNode {
    state: Arc<NodeState>,
    config: NodeConfig,
}

impl AgoraNode {
    /// Create a new node: open storage, start the alert dispatcher, wire the
    /// density engine.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let storage = Arc::new(Storage::open(&config.data_dir)?);

        let (alert_handle, alerts) = AlertDispatcher::start();

        let monitor = CrowdMonitor::with_config(
            Arc::clone(&storage),
            alert_handle,
            config.density.clone(),
        );

        let state = Arc::new(NodeState {
            storage,
            monitor,
            alerts,
            config: config.clone(),
        });

        Ok(Self { state, config })
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<NodeState> {
        Arc::clone(&self.state)
    }

    /// Run the node (starts the HTTP server).
    pub async fn run(self) -> Result<()> {
        tracing::info!("Agora node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  Data: {:?}", self.config.data_dir);
        tracing::info!(
            "  Density: radius {} m, window {:?}, cutoffs >{} / >{}",
            self.config.density.radius_m,
            self.config.density.active_window,
            self.config.density.medium_over,
            self.config.density.heavy_over,
        );

        let app = api::build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
