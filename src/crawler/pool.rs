//! Bounded worker pool for fetch-and-process units
//!
//! Units are spawned as tokio tasks, and each task must hold a permit from
//! the pool's semaphore before it runs. At most `width` units therefore do
//! network I/O at any moment. The rest wait in line for a permit.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// How a pool shutdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every task finished within the grace period
    Drained,
    /// The grace period elapsed; this many tasks were aborted
    Aborted(usize),
}

impl ShutdownOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Drained)
    }
}

/// Fixed-width pool of concurrent units of work
pub struct WorkerPool {
    width: usize,
    permits: Arc<Semaphore>,
    tasks: Mutex<JoinSet<()>>,
}

impl WorkerPool {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            permits: Arc::new(Semaphore::new(width)),
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Units currently holding a permit
    pub fn busy(&self) -> usize {
        self.width.saturating_sub(self.permits.available_permits())
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// Submits a unit of work
    ///
    /// Returns false, dropping the unit unrun, if the pool has been closed.
    /// A unit still waiting for a permit when the pool closes is dropped too.
    /// Must be called from within a tokio runtime.
    pub fn submit<F>(&self, unit: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_closed() {
            return false;
        }

        let permits = Arc::clone(&self.permits);
        let mut tasks = self.tasks.lock();

        // Reap finished tasks so the set only holds live ones
        while let Some(result) = tasks.try_join_next() {
            log_task_failure(result);
        }

        tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            unit.await;
        });

        true
    }

    /// Closes the pool and waits up to `grace` for running units
    ///
    /// Units still queued for a permit are cancelled immediately. Units that
    /// are still running when the grace period elapses are aborted.
    pub async fn shutdown(&self, grace: Duration) -> ShutdownOutcome {
        self.permits.close();

        let mut tasks = std::mem::take(&mut *self.tasks.lock());

        let drain = async {
            while let Some(result) = tasks.join_next().await {
                log_task_failure(result);
            }
        };

        match tokio::time::timeout(grace, drain).await {
            Ok(()) => ShutdownOutcome::Drained,
            Err(_) => {
                let remaining = tasks.len();
                tasks.abort_all();
                tracing::warn!(
                    "Worker pool did not drain within {:?}; aborted {} task(s)",
                    grace,
                    remaining
                );
                ShutdownOutcome::Aborted(remaining)
            }
        }
    }
}

fn log_task_failure(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            tracing::error!("Worker task panicked: {}", e);
        }
    }
}
