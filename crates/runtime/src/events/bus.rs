//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ActionEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn start and completion
    Turn,
    /// Executed actions and remaining action points
    Action,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Turn(TurnEvent),
    Action(ActionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Turn(_) => Topic::Turn,
            Event::Action(_) => Topic::Action,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turn: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Action => &self.action,
        }
    }

    /// Publish an event to its corresponding topic. Best-effort: events
    /// without subscribers are dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
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
    use tactics_core::UnitId;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut actions = bus.subscribe(Topic::Action);

        bus.publish(Event::Turn(TurnEvent::Started {
            unit: UnitId(1),
            action_points: 2,
        }));

        assert!(matches!(turns.recv().await, Ok(Event::Turn(_))));
        assert!(actions.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        EventBus::new().publish(Event::Turn(TurnEvent::Started {
            unit: UnitId(1),
            action_points: 0,
        }));
    }
}
