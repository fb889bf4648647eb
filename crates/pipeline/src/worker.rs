//! Worker - the loop between consumers and the producer
//!
//! Drains an input channel of messages, runs each through the hook chain,
//! and forwards kept messages to the producer channel. Dropped messages are
//! accounted and discarded.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sift_hooks::Chain;
use sift_protocol::Message;

use crate::error::{PipelineError, Result};
use crate::metrics::WorkerMetrics;

/// Pipeline worker applying the hook chain to every message
///
/// The chain is immutable and shared; per-message state lives inside each
/// hook call. Run one worker, or shard the input across several via
/// [`Worker::run_sharded`].
pub struct Worker {
    chain: Arc<Chain>,
    metrics: Arc<WorkerMetrics>,
}

impl Worker {
    /// Create a worker around a hook chain
    pub fn new(chain: Chain) -> Self {
        Self {
            chain: Arc::new(chain),
            metrics: Arc::new(WorkerMetrics::new()),
        }
    }

    /// Get a metrics handle that stays valid after `run()` consumes the worker
    pub fn metrics_handle(&self) -> Arc<WorkerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Get the hook chain
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Process one message, forwarding it if the chain keeps it
    ///
    /// # Errors
    ///
    /// [`PipelineError::ProducerClosed`] if the message was kept but the
    /// producer channel is gone.
    async fn process(&self, mut message: Message, producer: &mpsc::Sender<Message>) -> Result<()> {
        self.metrics.record_received(message.len() as u64);

        if self.chain.handle(&mut message).is_keep() {
            let bytes = message.len() as u64;
            if producer.send(message).await.is_err() {
                self.metrics.record_forward_failure();
                return Err(PipelineError::ProducerClosed);
            }
            self.metrics.record_forwarded(bytes);
        } else {
            self.metrics.record_dropped();
        }

        Ok(())
    }

    /// Run the worker until the input channel closes
    ///
    /// Consumes the worker. Returns early with an error if the producer
    /// channel goes away while messages are still flowing.
    pub async fn run(
        self,
        mut receiver: mpsc::Receiver<Message>,
        producer: mpsc::Sender<Message>,
    ) -> Result<()> {
        tracing::info!(hooks = ?self.chain.names(), "worker starting");

        while let Some(message) = receiver.recv().await {
            match self.process(message, &producer).await {
                Ok(()) => {}
                Err(error) => {
                    tracing::warn!(%error, "worker stopping early");
                    return Err(error);
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            messages_received = snapshot.messages_received,
            messages_forwarded = snapshot.messages_forwarded,
            messages_dropped = snapshot.messages_dropped,
            "worker shutting down"
        );

        Ok(())
    }

    /// Run one worker task per input shard
    ///
    /// All tasks share this worker's chain and metrics. Use this when many
    /// consumers feed sharded channels and one task cannot keep up.
    pub fn run_sharded(
        self,
        receivers: Vec<mpsc::Receiver<Message>>,
        producer: mpsc::Sender<Message>,
    ) -> Vec<JoinHandle<Result<()>>> {
        let worker_count = receivers.len();
        tracing::info!(
            hooks = ?self.chain.names(),
            worker_count,
            "workers starting (sharded mode)"
        );

        let worker = Arc::new(self);
        let mut handles = Vec::with_capacity(worker_count);

        for (worker_id, mut receiver) in receivers.into_iter().enumerate() {
            let worker = Arc::clone(&worker);
            let producer = producer.clone();
            handles.push(tokio::spawn(async move {
                tracing::debug!(worker_id, "worker shard starting");

                while let Some(message) = receiver.recv().await {
                    worker.process(message, &producer).await?;
                }

                tracing::debug!(worker_id, "worker shard stopping");
                Ok(())
            }));
        }

        handles
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("hooks", &self.chain.names())
            .finish()
    }
}
