// ── Per-zone change streams ──
//
// Subscription types the entity layer uses to learn about new state
// without polling the cache itself.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{ZoneId, ZoneState};
use crate::store::StateCache;

/// A subscription to one zone's state.
///
/// `changed()` only resolves when this zone's state actually differs from
/// the last one handed out, so a write to another zone stays silent.
pub struct ZoneStream {
    zone: ZoneId,
    cache: Arc<StateCache>,
    receiver: watch::Receiver<u64>,
    current: ZoneState,
}

impl ZoneStream {
    pub(crate) fn new(zone: ZoneId, cache: Arc<StateCache>) -> Self {
        let mut receiver = cache.subscribe();
        receiver.mark_unchanged();
        let current = cache.read(zone);
        Self {
            zone,
            cache,
            receiver,
            current,
        }
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// State as of creation or the last `changed()`.
    pub fn current(&self) -> &ZoneState {
        &self.current
    }

    /// Wait for this zone's state to change.
    /// Returns `None` if the revision channel has closed.
    pub async fn changed(&mut self) -> Option<ZoneState> {
        loop {
            self.receiver.changed().await.ok()?;
            let next = self.cache.read(self.zone);
            if next != self.current {
                self.current = next.clone();
                return Some(next);
            }
        }
    }

    /// Convert into a `Stream` that yields the zone state on every cache
    /// change, starting with the current one.
    pub fn into_stream(self) -> ZoneWatchStream {
        ZoneWatchStream {
            zone: self.zone,
            cache: self.cache,
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by the cache's revision channel.
pub struct ZoneWatchStream {
    zone: ZoneId,
    cache: Arc<StateCache>,
    inner: WatchStream<u64>,
}

impl Stream for ZoneWatchStream {
    type Item = ZoneState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(_)) => Poll::Ready(Some(self.cache.read(self.zone))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use futures_util::StreamExt;

    use super::*;

    fn zone(n: u8) -> ZoneId {
        ZoneId::new(n, 6).unwrap()
    }

    fn lit(n: u8) -> BTreeMap<ZoneId, ZoneState> {
        let mut state = ZoneState::placeholder(zone(n));
        state.power = true;
        BTreeMap::from([(zone(n), state)])
    }

    #[tokio::test]
    async fn changed_skips_other_zones() {
        let cache = Arc::new(StateCache::new(6));
        let mut stream = ZoneStream::new(zone(2), Arc::clone(&cache));

        cache.apply_optimistic(&lit(5));
        cache.apply_optimistic(&lit(2));

        let next = stream.changed().await.unwrap();
        assert_eq!(next.zone, zone(2));
        assert!(next.power);
        assert!(stream.current().power);
    }

    #[test]
    fn other_zone_changes_stay_silent() {
        let cache = Arc::new(StateCache::new(6));
        let mut stream = ZoneStream::new(zone(2), Arc::clone(&cache));
        let mut changed = tokio_test::task::spawn(stream.changed());

        tokio_test::assert_pending!(changed.poll());
        cache.apply_optimistic(&lit(5));
        assert!(changed.is_woken());
        tokio_test::assert_pending!(changed.poll());

        cache.apply_optimistic(&lit(2));
        let state = tokio_test::assert_ready!(changed.poll()).unwrap();
        assert!(state.power);
    }

    #[tokio::test]
    async fn stream_yields_current_then_updates() {
        let cache = Arc::new(StateCache::new(6));
        let mut stream = ZoneStream::new(zone(1), Arc::clone(&cache)).into_stream();

        let first = stream.next().await.unwrap();
        assert!(!first.power);

        cache.apply_optimistic(&lit(1));
        let second = stream.next().await.unwrap();
        assert!(second.power);
    }
}
