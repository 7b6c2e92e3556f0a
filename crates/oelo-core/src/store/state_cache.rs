// ── Zone state cache ──
//
// Lock-free storage for the last known state of every zone. The whole
// table is swapped at once, so readers never see half of a poll applied.
// Every mutation bumps a revision counter that change streams watch.

use std::collections::BTreeMap;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{ControllerSnapshot, ZoneId, ZoneMemory, ZoneState};

#[derive(Debug, Clone)]
struct ZoneTable {
    zones: Vec<ZoneState>,
    polled_at: Option<DateTime<Utc>>,
}

/// Shared cache of per-zone state plus the controller availability flag.
pub struct StateCache {
    zone_count: u8,
    table: ArcSwap<ZoneTable>,
    available: watch::Sender<bool>,
    revision: watch::Sender<u64>,
}

impl StateCache {
    pub fn new(zone_count: u8) -> Self {
        let table = ZoneTable {
            zones: ZoneId::all(zone_count).map(ZoneState::placeholder).collect(),
            polled_at: None,
        };
        let (available, _) = watch::channel(false);
        let (revision, _) = watch::channel(0);

        Self {
            zone_count,
            table: ArcSwap::from_pointee(table),
            available,
            revision,
        }
    }

    pub fn zone_count(&self) -> u8 {
        self.zone_count
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Latest known state of one zone. Never blocks.
    ///
    /// Before the first successful poll this is a placeholder marked
    /// unavailable; afterwards the last known values are kept even while
    /// the controller is unreachable.
    pub fn read(&self, zone: ZoneId) -> ZoneState {
        let table = self.table.load();
        let mut state = table
            .zones
            .get(zone.slot())
            .cloned()
            .unwrap_or_else(|| ZoneState::placeholder(zone));
        state.available = table.polled_at.is_some() && self.is_available();
        state
    }

    pub fn read_all(&self) -> Vec<ZoneState> {
        let table = self.table.load();
        let available = table.polled_at.is_some() && self.is_available();
        table
            .zones
            .iter()
            .cloned()
            .map(|mut state| {
                state.available = available;
                state
            })
            .collect()
    }

    pub fn is_available(&self) -> bool {
        *self.available.borrow()
    }

    /// When the last successful poll landed.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.table.load().polled_at
    }

    /// Time since the last successful poll.
    pub fn age(&self) -> Option<chrono::Duration> {
        self.last_update().map(|t| Utc::now() - t)
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Replace every zone from a poll result.
    ///
    /// Readings the controller left out keep their previous values; zones
    /// missing from the snapshot keep their old `last_seen`.
    pub fn update(&self, snapshot: &ControllerSnapshot, at: DateTime<Utc>) {
        let mut missing = Vec::new();
        self.table.rcu(|table| {
            missing.clear();
            let mut next = ZoneTable::clone(table);
            for state in &mut next.zones {
                let Some(reading) = snapshot.zone(state.zone) else {
                    missing.push(state.zone.get());
                    continue;
                };
                state.power = reading.power;
                if let Some(brightness) = reading.brightness {
                    state.brightness = brightness;
                }
                if let Some(color) = reading.color {
                    state.color = color;
                }
                state.effect = if reading.power {
                    reading.effect.clone()
                } else {
                    None
                };
                state.last_seen = Some(at);
            }
            next.polled_at = Some(at);
            next
        });

        if !missing.is_empty() {
            warn!(zones = ?missing, "controller did not report every configured zone");
        }
        self.bump();
    }

    /// Overwrite the listed zones with the state a successful write implies.
    ///
    /// `last_seen` is left alone: it only moves when the controller reports.
    pub fn apply_optimistic(&self, targets: &BTreeMap<ZoneId, ZoneState>) {
        if targets.is_empty() {
            return;
        }
        self.table.rcu(|table| {
            let mut next = ZoneTable::clone(table);
            for (zone, target) in targets {
                if let Some(state) = next.zones.get_mut(zone.slot()) {
                    state.power = target.power;
                    state.brightness = target.brightness;
                    state.color = target.color;
                    state.effect.clone_from(&target.effect);
                }
            }
            next
        });
        debug!(zones = targets.len(), "applied optimistic update");
        self.bump();
    }

    /// Lay remembered attributes over the polled state. Run after a poll.
    pub fn restore(&self, memory: &BTreeMap<ZoneId, ZoneMemory>) {
        if memory.is_empty() {
            return;
        }
        self.table.rcu(|table| {
            let mut next = ZoneTable::clone(table);
            for (zone, remembered) in memory {
                if let Some(state) = next.zones.get_mut(zone.slot()) {
                    remembered.restore_into(state);
                }
            }
            next
        });
        debug!(zones = memory.len(), "restored remembered zone state");
        self.bump();
    }

    /// Returns `true` if the flag changed.
    pub fn mark_available(&self) -> bool {
        self.set_available(true)
    }

    /// Returns `true` if the flag changed. Attribute values are kept.
    pub fn mark_unavailable(&self) -> bool {
        self.set_available(false)
    }

    fn set_available(&self, value: bool) -> bool {
        let changed = self.available.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
        if changed {
            self.bump();
        }
        changed
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Fires on every update, optimistic write and availability flip.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn subscribe_availability(&self) -> watch::Receiver<bool> {
        self.available.subscribe()
    }
}

impl std::fmt::Debug for StateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCache")
            .field("zone_count", &self.zone_count)
            .field("available", &self.is_available())
            .field("last_update", &self.last_update())
            .finish_non_exhaustive()
    }
}
