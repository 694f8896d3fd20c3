//! UseCase: countdown start and the per-room driver task.
//!
//! A valid request persists the requested seconds to the shared store, then
//! spawns a driver: once per second it decrements the in-memory counter,
//! persists the new value and broadcasts a `timer_update` to the room's
//! timer group, until the counter reaches zero and the key is cleared. The
//! driver is fire-and-forget relative to the requesting session: it keeps
//! ticking after that session disconnects, since other sessions observing
//! the same timer group still need updates.
//!
//! A second request for a room whose countdown is still running aborts the
//! previous driver before spawning its own (cancel-and-restart), so
//! observers always see a single clean decrement stream. Driver handles are
//! kept in a map keyed by group name; slots carry a token so a finished
//! driver only removes its own entry, never a successor's.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{
    BroadcastRouter, ChannelKind, GroupName, KeyValueStore, RoomEvent, RoomName,
};

use super::error::CountdownError;

struct DriverSlot {
    token: u64,
    handle: JoinHandle<()>,
}

pub struct StartCountdownUseCase {
    router: Arc<dyn BroadcastRouter>,
    store: Arc<dyn KeyValueStore>,
    running: Arc<Mutex<HashMap<GroupName, DriverSlot>>>,
    next_token: AtomicU64,
}

impl StartCountdownUseCase {
    pub fn new(router: Arc<dyn BroadcastRouter>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            router,
            store,
            running: Arc::new(Mutex::new(HashMap::new())),
            next_token: AtomicU64::new(0),
        }
    }

    /// Start (or restart) the countdown for a room.
    ///
    /// # Arguments
    ///
    /// * `room` - The room whose timer group receives the ticks
    /// * `seconds` - Requested duration; must be greater than zero
    pub async fn execute(&self, room: &RoomName, seconds: u64) -> Result<(), CountdownError> {
        if seconds == 0 {
            return Err(CountdownError::InvalidDuration);
        }

        let group = GroupName::new(ChannelKind::Timer, room);
        if let Err(e) = self
            .store
            .set(&group.countdown_key(), &seconds.to_string())
            .await
        {
            tracing::warn!("Failed to persist countdown start for '{}': {}", group, e);
        }

        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let mut running = self.running.lock().await;
        if let Some(previous) = running.remove(&group) {
            previous.handle.abort();
            tracing::info!("Superseded running countdown for '{}'", group);
        }
        let handle = tokio::spawn(drive_countdown(
            Arc::clone(&self.router),
            Arc::clone(&self.store),
            Arc::clone(&self.running),
            group.clone(),
            seconds,
            token,
        ));
        running.insert(group.clone(), DriverSlot { token, handle });
        tracing::info!("Started {}s countdown for '{}'", seconds, group);

        Ok(())
    }
}

async fn drive_countdown(
    router: Arc<dyn BroadcastRouter>,
    store: Arc<dyn KeyValueStore>,
    running: Arc<Mutex<HashMap<GroupName, DriverSlot>>>,
    group: GroupName,
    seconds: u64,
    token: u64,
) {
    let key = group.countdown_key();
    let mut remaining = seconds;
    while remaining > 0 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        remaining -= 1;
        if let Err(e) = store.set(&key, &remaining.to_string()).await {
            // A store outage must not stall observers: skip the persist for
            // this tick and keep broadcasting the in-memory counter.
            tracing::warn!("Failed to persist countdown tick for '{}': {}", group, e);
        }
        let event = RoomEvent::TimerUpdate {
            time_left: remaining,
        };
        if let Err(e) = router.broadcast(&group, &event).await {
            tracing::warn!("Failed to broadcast countdown tick for '{}': {}", group, e);
        }
    }

    if let Err(e) = store.delete(&key).await {
        tracing::warn!("Failed to clear countdown state for '{}': {}", group, e);
    }
    tracing::info!("Countdown for '{}' finished", group);

    let mut running = running.lock().await;
    if running.get(&group).is_some_and(|slot| slot.token == token) {
        running.remove(&group);
    }
}
