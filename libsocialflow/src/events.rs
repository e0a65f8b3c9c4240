//! Change notification for store and gateway activity
//!
//! This module provides an in-process event bus so observers (a dashboard, a
//! calendar view, a logger) can re-render without polling the store.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! Store mutations publish a full snapshot of the changed collection rather
//! than a delta; observers replace their copy wholesale. Generation progress
//! events carry just enough to drive a loading affordance.
//!
//! # Non-Blocking Behavior
//!
//! If no subscribers exist, events are dropped immediately without allocation
//! or blocking. Subscribers can lag without blocking emitters.
//!
//! # Example
//!
//! ```no_run
//! use libsocialflow::events::{EventBus, Event};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//!
//! // Subscribe to events
//! let mut receiver = event_bus.subscribe();
//!
//! // Emit events (non-blocking)
//! event_bus.emit(Event::PostsChanged { posts: vec![] });
//!
//! // Receive events
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{ConnectedAccount, SocialPost};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing change and progress events
///
/// The event bus uses a broadcast channel to distribute events to multiple
/// subscribers. Events are dropped if no subscribers exist, ensuring
/// non-blocking behavior.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per subscriber
    /// before older events are dropped (if the subscriber is lagging).
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer capacity per subscriber (recommended: 100)
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription. Multiple subscribers are supported.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// This is a non-blocking operation. If no subscribers exist, the event
    /// is dropped immediately. If subscribers are lagging, they may miss
    /// events (oldest events are dropped first).
    pub fn emit(&self, event: Event) {
        // send() returns Err if no receivers exist, which is fine
        // We don't want to block or fail if nobody is listening
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    ///
    /// Useful for debugging or metrics, not for control flow.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Which generation operation an event refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Single,
    Campaign,
}

/// Events emitted by the store and the service layer
///
/// All events are cloneable and serializable for flexibility in how
/// they're consumed (logging, UI updates, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The post collection changed; carries the full new snapshot
    PostsChanged { posts: Vec<SocialPost> },

    /// The account collection changed; carries the full new snapshot
    AccountsChanged { accounts: Vec<ConnectedAccount> },

    /// A generation request was handed to the gateway
    GenerationStarted { kind: GenerationKind, topic: String },

    /// Generation finished; `count` is the number of items produced
    GenerationCompleted {
        kind: GenerationKind,
        topic: String,
        count: usize,
    },

    /// Generation failed
    GenerationFailed {
        kind: GenerationKind,
        topic: String,
        error: String,
    },
}
