// ── Command debouncer ──
//
// Collects attribute writes per zone and decides when they are due. The
// `Debouncer` itself is plain data driven by explicit instants; the
// `CommandQueue` wraps it for sharing between facades and the flush task.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::trace;

use crate::config::DebounceConfig;
use crate::model::{PendingChanges, ZoneChange, ZoneId};

/// Pending changes of every zone touched since the last flush.
pub type PendingBatch = BTreeMap<ZoneId, PendingChanges>;

/// Deadline bookkeeping for one debounce window.
#[derive(Debug)]
pub struct Debouncer {
    config: DebounceConfig,
    pending: PendingBatch,
    first_enqueued: Option<Instant>,
    last_enqueued: Option<Instant>,
}

impl Debouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending: BTreeMap::new(),
            first_enqueued: None,
            last_enqueued: None,
        }
    }

    /// Record a write; the latest value per (zone, attribute) wins.
    pub fn enqueue(&mut self, zone: ZoneId, change: ZoneChange, now: Instant) {
        self.pending.entry(zone).or_default().apply(change);
        self.first_enqueued.get_or_insert(now);
        self.last_enqueued = Some(now);
    }

    /// When the pending batch must be sent, if anything is pending.
    ///
    /// The quiet window restarts on every enqueue; the max-wait bound is
    /// fixed by the first enqueue of the window.
    pub fn next_deadline(&self) -> Option<Instant> {
        let first = self.first_enqueued?;
        let last = self.last_enqueued.unwrap_or(first);
        Some((last + self.config.quiet_window).min(first + self.config.max_wait))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Take everything pending and start a fresh window.
    pub fn take(&mut self) -> Option<PendingBatch> {
        self.first_enqueued = None;
        self.last_enqueued = None;
        if self.pending.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.pending))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_zones(&self) -> usize {
        self.pending.len()
    }
}

/// A [`Debouncer`] shared between zone facades and the flush task.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    debouncer: Mutex<Debouncer>,
    wake: Notify,
}

impl CommandQueue {
    pub(crate) fn new(config: DebounceConfig) -> Self {
        Self {
            debouncer: Mutex::new(Debouncer::new(config)),
            wake: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Debouncer> {
        self.debouncer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn enqueue(&self, zone: ZoneId, change: ZoneChange) {
        trace!(zone = %zone, attribute = %change.attribute(), "enqueue");
        self.lock().enqueue(zone, change, Instant::now());
        self.wake.notify_one();
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.lock().next_deadline()
    }

    /// Take the batch if its deadline has passed.
    pub(crate) fn take_due(&self, now: Instant) -> Option<PendingBatch> {
        let mut debouncer = self.lock();
        if debouncer.is_due(now) {
            debouncer.take()
        } else {
            None
        }
    }

    /// Take the batch regardless of deadlines.
    pub(crate) fn take(&self) -> Option<PendingBatch> {
        self.lock().take()
    }

    pub(crate) fn pending_zones(&self) -> usize {
        self.lock().pending_zones()
    }

    /// Resolves after the next enqueue (or immediately if one happened
    /// since the last call).
    pub(crate) async fn enqueued(&self) {
        self.wake.notified().await;
    }
}
