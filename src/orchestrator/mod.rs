// src/orchestrator/mod.rs — Fan-out/fan-in worker coordination
//
// Dispatches every registered worker concurrently against one document and
// merges their results into a single map keyed by worker name. Worker
// failures are first-class partial results here, never aborts.

pub mod workers;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::infra::errors::DraftmillError;

/// A named, independent unit of work over a shared input document.
/// Workers must not depend on another worker's output.
#[async_trait]
pub trait Worker: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, document: &str) -> Result<serde_json::Value, DraftmillError>;
}

/// Per-worker result union: the aggregate map carries exactly one entry per
/// submitted worker, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerOutcome {
    Success(serde_json::Value),
    Failed(String),
}

impl WorkerOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkerOutcome::Success(_))
    }

    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            WorkerOutcome::Success(value) => Some(value),
            WorkerOutcome::Failed(_) => None,
        }
    }
}

/// Fan-out/fan-in coordinator over a bounded concurrency pool.
///
/// Reusable across `process_document` calls; `shutdown` releases the pool,
/// after which further submissions fail fast.
pub struct Orchestrator {
    workers: Vec<Arc<dyn Worker>>,
    permits: Arc<Semaphore>,
}

impl Orchestrator {
    pub fn new(pool_size: usize) -> Self {
        Self {
            workers: Vec::new(),
            permits: Arc::new(Semaphore::new(pool_size.max(1))),
        }
    }

    /// Register a worker. Names must be unique; a duplicate replaces the
    /// earlier registration.
    pub fn register(mut self, worker: Arc<dyn Worker>) -> Self {
        if let Some(existing) = self
            .workers
            .iter_mut()
            .find(|w| w.name() == worker.name())
        {
            tracing::warn!(worker = %worker.name(), "replacing duplicate worker registration");
            *existing = worker;
        } else {
            self.workers.push(worker);
        }
        self
    }

    pub fn worker_names(&self) -> Vec<&str> {
        self.workers.iter().map(|w| w.name()).collect()
    }

    /// Run every registered worker concurrently against `document`.
    ///
    /// All tasks are submitted before any result is awaited; aggregation
    /// happens in completion order, which is non-deterministic and carries
    /// no meaning. One failing (or panicking) worker is recorded under its
    /// name and never blocks collection of the rest.
    pub async fn process_document(
        &self,
        document: &str,
    ) -> Result<HashMap<String, WorkerOutcome>, DraftmillError> {
        if self.permits.is_closed() {
            return Err(DraftmillError::PoolClosed);
        }

        let mut tasks = JoinSet::new();
        for worker in &self.workers {
            let worker = worker.clone();
            let permits = self.permits.clone();
            let document = document.to_string();

            tasks.spawn(async move {
                let name = worker.name().to_string();
                let permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (name, WorkerOutcome::Failed("worker pool shut down".into()))
                    }
                };

                let result = std::panic::AssertUnwindSafe(worker.run(&document))
                    .catch_unwind()
                    .await;
                drop(permit);

                let outcome = match result {
                    Ok(Ok(value)) => WorkerOutcome::Success(value),
                    Ok(Err(e)) => {
                        tracing::warn!(worker = %name, error = %e, "worker task failed");
                        WorkerOutcome::Failed(e.to_string())
                    }
                    Err(_) => {
                        tracing::warn!(worker = %name, "worker task panicked");
                        WorkerOutcome::Failed("worker panicked".into())
                    }
                };
                (name, outcome)
            });
        }

        let mut results = HashMap::with_capacity(self.workers.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, outcome)) => {
                    results.insert(name, outcome);
                }
                // Unreachable while run() is wrapped in catch_unwind, but a
                // cancelled task must not sink the whole aggregation either.
                Err(e) => tracing::error!(error = %e, "worker task join failed"),
            }
        }

        Ok(results)
    }

    /// Close the pool. In-flight work finishes; later submissions error
    /// with `PoolClosed`.
    pub fn shutdown(&self) {
        self.permits.close();
    }

    pub fn is_shut_down(&self) -> bool {
        self.permits.is_closed()
    }
}
