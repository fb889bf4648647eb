//! Sift - Pipeline
//!
//! The async worker loop that connects message sources to producers via
//! channels, applying the hook chain to every message in between.
//!
//! # Architecture
//!
//! ```text
//! [Consumers]                  [Worker]                [Producer]
//!    ...  ──→ mpsc::Receiver ──→ [Hook Chain] ──keep──→ mpsc::Sender ──→ ...
//!                                     └──drop──→ (accounted, gone)
//! ```
//!
//! # Key Design
//!
//! - **Channel-based**: `tokio::sync::mpsc` on both sides; consumers and
//!   producers are external collaborators
//! - **Hooks are CPU-bound**: the chain runs synchronously between awaits;
//!   no I/O happens inside a hook
//! - **Sharded scale-out**: one worker task per input shard, all sharing the
//!   same immutable chain
//!
//! # Example
//!
//! ```ignore
//! use sift_pipeline::Worker;
//! use tokio::sync::mpsc;
//!
//! let (in_tx, in_rx) = mpsc::channel(1024);
//! let (out_tx, out_rx) = mpsc::channel(1024);
//!
//! let worker = Worker::new(chain);
//! let metrics = worker.metrics_handle();
//! tokio::spawn(worker.run(in_rx, out_tx));
//!
//! // consumers send Messages to in_tx; the producer drains out_rx
//! ```

mod error;
mod metrics;
mod worker;

pub use error::{PipelineError, Result};
pub use metrics::{MetricsSnapshot, WorkerMetrics};
pub use worker::Worker;

// Re-export key types from dependencies for convenience
pub use sift_hooks::Chain;
pub use sift_protocol::Message;

/// Default channel buffer size for the producer side
pub const DEFAULT_CHANNEL_SIZE: usize = 1024;
