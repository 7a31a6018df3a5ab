//! Agora Node - Crowd Density Tracking Service
//!
//! Ingests geolocation reports from mobile clients and derives real-time
//! crowd-density signals over a sliding window of recent reports.
//!
//! # Architecture
//!
//! - **Storage**: RocksDB-backed location journal (timestamp-ordered keys)
//! - **Density**: the `agora-density` engine, invoked per incoming update
//! - **Alerts**: detached dispatch channel feeding WebSocket sessions
//! - **API**: HTTP endpoints plus a per-subject WebSocket transport
//!
//! # Example
//!
//! ```no_run
//! use agora_node::{AgoraNode, NodeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::default();
//!     let node = AgoraNode::new(config).await?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod alerts;
pub mod api;
pub mod error;
pub mod node;
pub mod storage;
pub mod ws;

pub use alerts::{Alert, AlertDispatcher, AlertHandle};
pub use error::{Error, Result};
pub use node::{AgoraNode, NodeConfig};
pub use storage::Storage;
