//! Domain event system — observing attempts in flight.
//!
//! Events are published as an attempt progresses. Dashboards, metrics, and
//! log sinks can subscribe to react without coupling to the orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A pull-request attempt began for a labeled issue
    AttemptStarted {
        attempt_id: String,
        issue_number: u64,
        timestamp: DateTime<Utc>,
    },

    /// An action was executed by the runner
    ActionExecuted {
        action: String,
        finished: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The planning stage produced a pull request description
    PlanProduced {
        attempt_id: String,
        title: String,
        commit_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The attempt stopped before any commit was written
    AttemptAborted {
        attempt_id: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// One planned commit was recorded (and pushed)
    CommitWritten {
        message: String,
        empty: bool,
        timestamp: DateTime<Utc>,
    },

    /// Every planned commit was written
    AttemptCompleted {
        attempt_id: String,
        commits_written: usize,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Components can
/// subscribe to receive all events and filter for what they care about.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::CommitWritten {
            message: "Add foo.py".into(),
            empty: false,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            DomainEvent::CommitWritten { message, empty, .. } => {
                assert_eq!(message, "Add foo.py");
                assert!(!empty);
            }
            _ => panic!("Expected CommitWritten event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        // Publishing with no subscribers should not panic
        bus.publish(DomainEvent::AttemptAborted {
            attempt_id: "a-1".into(),
            reason: "no subscribers".into(),
            timestamp: Utc::now(),
        });
    }
}
