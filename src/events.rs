//! Application event broadcasting.
//!
//! Mutations to the blacklist tables and completed syncs are announced on a
//! broadcast channel so frontends can refresh. Emission is fire-and-forget;
//! having no subscribers is normal.

use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlacklistAction {
    Added,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    MovieBlacklistChanged { action: BlacklistAction },
    SeriesBlacklistChanged { action: BlacklistAction },
    SubtitlesSynced { path: PathBuf },
}

/// Broadcast bus for application events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Emit an event. Errors (no subscribers) are logged and swallowed.
    pub fn emit(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            debug!("No subscribers for app event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.emit(AppEvent::MovieBlacklistChanged {
            action: BlacklistAction::Added,
        });
    }

    #[test]
    fn subscriber_receives_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.emit(AppEvent::SeriesBlacklistChanged {
            action: BlacklistAction::Deleted,
        });

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event,
            AppEvent::SeriesBlacklistChanged {
                action: BlacklistAction::Deleted,
            }
        );
    }
}
