//! Session lifecycle notifications.
//!
//! The pipeline never navigates or resets UI state itself; it emits an
//! event and the hosting application decides what a terminated session
//! means (navigation, modal, state reset).

use tokio::sync::broadcast;

/// Events emitted by the session layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The session cannot be recovered; credentials have been cleared.
    Terminated { reason: String },
}

/// Broadcast fan-out for session events.
///
/// Emitting with no subscribers is a no-op, which keeps teardown
/// idempotent in hosts that never subscribe.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(8);
        Self { tx }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit a terminated event.
    pub(crate) fn terminated(&self, reason: &str) {
        let _ = self.tx.send(SessionEvent::Terminated {
            reason: reason.to_string(),
        });
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_termination() {
        let events = SessionEvents::new();
        let mut rx = events.subscribe();
        events.terminated("refresh rejected");

        let SessionEvent::Terminated { reason } = rx.recv().await.unwrap();
        assert_eq!(reason, "refresh rejected");
    }

    #[test]
    fn emitting_without_subscribers_is_a_no_op() {
        let events = SessionEvents::new();
        events.terminated("nobody listening");
    }
}
