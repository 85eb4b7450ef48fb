//! Combat event bus.
//!
//! Replaces per-frame console logging with a structured event stream a
//! test harness or observability layer can drain.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use skirmish_common::EntityId;

use crate::enemy::EnemyState;

/// Events emitted by the combat core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An enemy's behavior state changed
    StateChanged {
        /// Enemy whose state changed
        entity: EntityId,
        /// Previous state
        from: EnemyState,
        /// New state
        to: EnemyState,
    },
    /// A melee swing or projectile landed
    Hit {
        /// Entity that dealt the damage
        attacker: EntityId,
        /// Entity that took the damage
        target: EntityId,
        /// Damage applied
        damage: i32,
    },
    /// An entity's health reached zero
    Died {
        /// Entity that died
        entity: EntityId,
    },
    /// A projectile was fired
    ProjectileFired {
        /// Entity that fired
        owner: EntityId,
    },
}

/// Bounded event bus for combat events.
///
/// Publishing never blocks; when the channel is full the event is
/// dropped.
#[derive(Debug)]
pub struct CombatEventBus {
    sender: Sender<CombatEvent>,
    receiver: Receiver<CombatEvent>,
}

impl Default for CombatEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl CombatEventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: CombatEvent) {
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns a receiver for an external subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<CombatEvent> {
        self.receiver.clone()
    }
}
