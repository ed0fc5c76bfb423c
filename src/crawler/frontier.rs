//! Admission and deduplication frontier
//!
//! The frontier is the only gate through which an address can be scheduled.
//! It remembers every address ever admitted and enforces the page budget.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use url::Url;

/// Set of admitted addresses bounded by a page budget
///
/// The budget is exact: the visited set never grows beyond `max_pages`, even
/// under contention. The duplicate check, the budget reservation and the
/// insert all happen while the address's shard entry is locked, so no two
/// callers can both admit the same address and a duplicate never consumes a
/// budget slot.
#[derive(Debug)]
pub struct Frontier {
    /// Normalized address -> admission sequence number
    visited: DashMap<String, usize>,
    admitted: AtomicUsize,
    max_pages: usize,
    halted: AtomicBool,
}

impl Frontier {
    pub fn new(max_pages: usize) -> Self {
        Self {
            visited: DashMap::new(),
            admitted: AtomicUsize::new(0),
            max_pages,
            halted: AtomicBool::new(false),
        }
    }

    /// Attempts to admit an address for fetching
    ///
    /// Returns true exactly once per normalized address, and false for repeat
    /// addresses, once the budget is spent, or after [`Frontier::halt`].
    pub fn try_admit(&self, url: &Url) -> bool {
        if self.is_halted() {
            return false;
        }

        match self.visited.entry(url.as_str().to_string()) {
            Entry::Occupied(_) => {
                tracing::trace!("Already admitted: {}", url);
                false
            }
            Entry::Vacant(slot) => match self.reserve_slot() {
                Some(sequence) => {
                    slot.insert(sequence);
                    tracing::debug!("Admitted #{}: {}", sequence + 1, url);
                    true
                }
                None => {
                    tracing::trace!("Page budget reached, not admitting {}", url);
                    false
                }
            },
        }
    }

    /// Claims one unit of the budget, returning its sequence number
    fn reserve_slot(&self) -> Option<usize> {
        self.admitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.max_pages).then_some(count + 1)
            })
            .ok()
    }

    /// Stops all further admissions; in-flight work is unaffected
    pub fn halt(&self) {
        if !self.halted.swap(true, Ordering::SeqCst) {
            tracing::info!("Frontier halted; no new pages will be admitted");
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Number of addresses admitted so far
    pub fn len(&self) -> usize {
        self.admitted.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// True once the budget has been fully spent
    pub fn is_exhausted(&self) -> bool {
        self.len() >= self.max_pages
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.visited.contains_key(url.as_str())
    }

    /// All admitted addresses in admission order
    pub fn visited(&self) -> Vec<String> {
        let mut entries: Vec<(usize, String)> = self
            .visited
            .iter()
            .map(|entry| (*entry.value(), entry.key().clone()))
            .collect();
        entries.sort_unstable();
        entries.into_iter().map(|(_, address)| address).collect()
    }
}
