// ── Coordinator ──
//
// Owns the transport, the state cache and the command queue for one
// controller, and runs the two background tasks that move data between
// them: the poll loop and the debounce flush loop.

use std::collections::BTreeMap;
use std::sync::{Arc, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::CoordinatorConfig;
use crate::debounce::{CommandQueue, PendingBatch};
use crate::error::CoreError;
use crate::model::{LightCommand, ZoneId, ZoneMemory};
use crate::poll::{PollPhase, PollTracker, Reachability};
use crate::store::StateCache;
use crate::transport::{HttpTransport, Transport};
use crate::zone::Zone;

/// Result of one poll attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The cache now holds a fresh snapshot.
    Updated,
    /// A flush held the network; try again next tick.
    Skipped,
    /// Shutdown began while the read was in flight; the result was dropped.
    Discarded,
}

// ── Coordinator ──────────────────────────────────────────────────────

/// Single point of contact with one controller.
///
/// Cheaply cloneable via `Arc`. Zone facades handed out by
/// [`zone()`](Self::zone) share its cache and command queue.
pub struct Coordinator<T: Transport> {
    inner: Arc<CoordinatorInner<T>>,
}

impl<T: Transport> Clone for Coordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CoordinatorInner<T> {
    config: CoordinatorConfig,
    transport: T,
    cache: Arc<StateCache>,
    queue: Arc<CommandQueue>,
    /// Held for the duration of every transport call.
    network: Mutex<()>,
    tracker: std::sync::Mutex<PollTracker>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator<HttpTransport> {
    /// Coordinator talking HTTP to `config.address`.
    pub fn http(config: CoordinatorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::new(config, transport)
    }
}

impl<T: Transport> Coordinator<T> {
    /// Validate the configuration and wire up the shared state. Does not
    /// touch the network; call [`start()`](Self::start) to begin polling.
    pub fn new(config: CoordinatorConfig, transport: T) -> Result<Self, CoreError> {
        config.validate()?;

        let cache = Arc::new(StateCache::new(config.zone_count));
        let queue = Arc::new(CommandQueue::new(config.debounce));
        let tracker = PollTracker::new(config.failure_threshold);

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                transport,
                cache,
                queue,
                network: Mutex::new(()),
                tracker: std::sync::Mutex::new(tracker),
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn cache(&self) -> &Arc<StateCache> {
        &self.inner.cache
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the poll and flush tasks. The first poll runs immediately.
    /// Calling this again while running is a no-op.
    pub async fn start(&self) {
        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            return;
        }

        let cancel = self.inner.cancel.clone();
        handles.push(tokio::spawn(poll_task(self.clone(), cancel.clone())));
        handles.push(tokio::spawn(flush_task(self.clone(), cancel)));
        info!(
            address = %self.inner.config.address,
            zones = self.inner.config.zone_count,
            interval_secs = self.inner.config.poll_interval.as_secs(),
            "coordinator started"
        );
    }

    /// Stop both tasks and wait for them to finish.
    ///
    /// A transport call already in flight runs to completion (or timeout)
    /// and its result is dropped. Changes still waiting for their debounce
    /// deadline are dropped as well.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            match handle.await {
                Err(e) if e.is_panic() => error!(error = %e, "coordinator task panicked"),
                _ => {}
            }
        }

        let dropped = self.inner.queue.pending_zones();
        if dropped > 0 {
            warn!(zones = dropped, "dropping unsent zone changes on shutdown");
            let _ = self.inner.queue.take();
        }
        debug!("coordinator stopped");
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Zones ────────────────────────────────────────────────────────

    /// Facade for zone `index` (1-based).
    pub fn zone(&self, index: u8) -> Result<Zone, CoreError> {
        let id = ZoneId::new(index, self.inner.config.zone_count)?;
        Ok(Zone::new(
            id,
            Arc::clone(&self.inner.cache),
            Arc::clone(&self.inner.queue),
        ))
    }

    /// Facades for every configured zone, in order.
    pub fn zones(&self) -> Vec<Zone> {
        ZoneId::all(self.inner.config.zone_count)
            .map(|id| {
                Zone::new(
                    id,
                    Arc::clone(&self.inner.cache),
                    Arc::clone(&self.inner.queue),
                )
            })
            .collect()
    }

    /// Seed attributes the controller does not report from what earlier
    /// writes left behind. Call after the first poll.
    pub fn restore(&self, memory: &BTreeMap<ZoneId, ZoneMemory>) {
        self.inner.cache.restore(memory);
    }

    // ── Availability ─────────────────────────────────────────────────

    pub fn is_available(&self) -> bool {
        self.inner.cache.is_available()
    }

    pub fn availability(&self) -> watch::Receiver<bool> {
        self.inner.cache.subscribe_availability()
    }

    pub fn poll_phase(&self) -> PollPhase {
        self.tracker().phase()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.tracker().consecutive_failures()
    }

    fn tracker(&self) -> MutexGuard<'_, PollTracker> {
        self.inner
            .tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ── Poll ─────────────────────────────────────────────────────────

    /// Poll right now instead of waiting for the next tick.
    ///
    /// Skipped (not queued) when a flush holds the network.
    pub async fn refresh_now(&self) -> Result<PollOutcome, CoreError> {
        self.poll_once().await
    }

    async fn poll_once(&self) -> Result<PollOutcome, CoreError> {
        let Ok(_network) = self.inner.network.try_lock() else {
            debug!("flush in flight, skipping poll");
            return Ok(PollOutcome::Skipped);
        };

        self.tracker().begin();
        let result = self.inner.transport.read_all().await;

        if self.inner.cancel.is_cancelled() {
            self.tracker().abandon();
            debug!("discarding poll result after shutdown");
            return Ok(PollOutcome::Discarded);
        }

        match result {
            Ok(snapshot) => {
                self.inner.cache.update(&snapshot, Utc::now());
                let change = self.tracker().record_success();
                if change == Reachability::BecameAvailable && self.inner.cache.mark_available() {
                    info!(address = %self.inner.config.address, "controller available");
                }
                Ok(PollOutcome::Updated)
            }
            Err(e) => {
                let (change, failures) = {
                    let mut tracker = self.tracker();
                    let change = tracker.record_failure();
                    (change, tracker.consecutive_failures())
                };
                warn!(error = %e, failures, "poll failed");
                if change == Reachability::BecameUnavailable && self.inner.cache.mark_unavailable()
                {
                    warn!(
                        address = %self.inner.config.address,
                        failures,
                        "controller unavailable"
                    );
                }
                Err(e)
            }
        }
    }

    // ── Flush ────────────────────────────────────────────────────────

    /// Send everything pending now, ignoring the debounce deadlines.
    ///
    /// Returns the number of zones written. Waits for an in-flight poll.
    pub async fn flush_now(&self) -> Result<usize, CoreError> {
        let _network = self.inner.network.lock().await;
        match self.inner.queue.take() {
            Some(batch) => self.dispatch(batch).await,
            None => Ok(0),
        }
    }

    /// Flush the pending batch if its deadline has passed.
    async fn flush_due(&self) -> Result<usize, CoreError> {
        let _network = self.inner.network.lock().await;
        match self.inner.queue.take_due(Instant::now()) {
            Some(batch) => self.dispatch(batch).await,
            None => Ok(0),
        }
    }

    /// Caller holds the network token.
    async fn dispatch(&self, batch: PendingBatch) -> Result<usize, CoreError> {
        let mut targets = BTreeMap::new();
        let mut commands = BTreeMap::new();
        for (zone, changes) in batch {
            let target = changes.resolve(&self.inner.cache.read(zone));
            commands.insert(zone, LightCommand::for_state(&target));
            targets.insert(zone, target);
        }

        let zones: Vec<u8> = commands.keys().map(|z| z.get()).collect();
        debug!(?zones, "flushing");
        let result = self.inner.transport.write_batch(&commands).await;

        if self.inner.cancel.is_cancelled() {
            debug!("discarding write result after shutdown");
            return result.map(|()| 0);
        }

        match result {
            Ok(()) => {
                self.inner.cache.apply_optimistic(&targets);
                Ok(targets.len())
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(
                        error = %e,
                        zones = targets.len(),
                        "write failed, leaving state to next poll"
                    );
                } else {
                    error!(error = %e, zones = targets.len(), "controller rejected write");
                }
                Err(e)
            }
        }
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Poll on a fixed cadence; the first tick fires immediately.
async fn poll_task<T: Transport>(coordinator: Coordinator<T>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(coordinator.inner.config.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                // Failures are logged and folded into availability.
                let _ = coordinator.poll_once().await;
            }
        }
    }
}

/// Sleep until the debounce deadline, re-arming whenever a new change
/// arrives, and flush once it passes.
async fn flush_task<T: Transport>(coordinator: Coordinator<T>, cancel: CancellationToken) {
    let queue = Arc::clone(&coordinator.inner.queue);

    loop {
        let deadline = queue.next_deadline();
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = queue.enqueued() => {}
            () = sleep_until(deadline) => {
                let _ = coordinator.flush_due().await;
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
