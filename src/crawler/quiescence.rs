//! Active work tracking and completion detection
//!
//! A crawl is finished when no unit of work is outstanding. Units are counted
//! up before they are submitted and counted down when their [`WorkGuard`]
//! drops, which happens after the unit has admitted any follow-up work. A child
//! unit is therefore always counted before its parent stops being counted, and
//! the counter cannot reach zero while work remains.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counter of submitted-but-unfinished units of work
#[derive(Debug, Default)]
pub struct ActiveWork {
    count: AtomicUsize,
    idle: Notify,
}

impl ActiveWork {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Counts a new unit of work; the unit ends when the guard drops
    pub fn begin(self: &Arc<Self>) -> WorkGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        WorkGuard {
            work: Arc::clone(self),
        }
    }

    /// Number of units currently outstanding
    pub fn current(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Waits until no unit of work is outstanding
    ///
    /// Returns immediately if the counter is already zero.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            // Register before checking so a wakeup between the check and the
            // await is not lost.
            notified.as_mut().enable();

            if self.current() == 0 {
                return;
            }

            notified.await;
        }
    }

    fn finish(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Marks one outstanding unit of work
///
/// Dropping the guard (normally, on panic, or because the unit was never run)
/// decrements the counter.
#[derive(Debug)]
pub struct WorkGuard {
    work: Arc<ActiveWork>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.work.finish();
    }
}
