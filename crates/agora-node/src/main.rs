//! Agora Node binary
//!
//! A crowd-density tracking node: location ingestion, density engine,
//! HTTP/WebSocket API.

use agora_node::{AgoraNode, NodeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_node=info,agora=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Agora Node");

    let config = NodeConfig::from_env();

    let node = AgoraNode::new(config).await?;
    node.run().await?;

    Ok(())
}
