//! The single event loop that owns all game state.
//!
//! Socket tasks never touch rooms directly. They post [`HubEvent`]s to
//! one channel, and the hub handles each event to completion before
//! taking the next, so no room is ever changed by two actions at once.

use crate::dispatcher::{Delivery, Dispatcher};
use crate::protocol::{ClientMessage, ServerMessage};
use derive_more::{Display, Error};
use duel_tictactoe::ConnectionId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Per-connection channel of outbound messages.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Something that happened on a connection.
#[derive(Debug)]
pub enum HubEvent {
    /// A socket opened; `outbox` reaches its writer task.
    Connected {
        /// New connection.
        id: ConnectionId,
        /// Where its messages go.
        outbox: Outbox,
    },
    /// A decoded action arrived.
    Inbound {
        /// Sender.
        id: ConnectionId,
        /// The action.
        message: ClientMessage,
    },
    /// A socket closed.
    Disconnected {
        /// Connection that went away.
        id: ConnectionId,
    },
}

/// The hub's event loop has stopped and accepts no more events.
#[derive(Debug, Clone, Copy, Display, Error)]
#[display("Hub event loop has stopped")]
pub struct HubClosed;

/// Cloneable sender side of the hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::UnboundedSender<HubEvent>,
    next_id: Arc<AtomicU64>,
}

impl HubHandle {
    /// Hands out a connection id never used before in this process.
    pub fn next_connection_id(&self) -> ConnectionId {
        ConnectionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a connection's outbox.
    pub fn connect(&self, id: ConnectionId, outbox: Outbox) -> Result<(), HubClosed> {
        self.send(HubEvent::Connected { id, outbox })
    }

    /// Queues an action from `id`.
    pub fn submit(&self, id: ConnectionId, message: ClientMessage) -> Result<(), HubClosed> {
        self.send(HubEvent::Inbound { id, message })
    }

    /// Reports that `id` went away.
    pub fn disconnect(&self, id: ConnectionId) -> Result<(), HubClosed> {
        self.send(HubEvent::Disconnected { id })
    }

    fn send(&self, event: HubEvent) -> Result<(), HubClosed> {
        self.events.send(event).map_err(|_| HubClosed)
    }
}

/// Owns the [`Dispatcher`] and every connection's outbox.
#[derive(Debug)]
pub struct Hub {
    dispatcher: Dispatcher,
    outboxes: HashMap<ConnectionId, Outbox>,
    events: mpsc::UnboundedReceiver<HubEvent>,
}

impl Hub {
    /// Creates a hub and the handle that feeds it.
    pub fn new(dispatcher: Dispatcher) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            dispatcher,
            outboxes: HashMap::new(),
            events: rx,
        };
        let handle = HubHandle {
            events: tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (hub, handle)
    }

    /// Spawns the event loop on the current runtime.
    ///
    /// The task finishes once every handle is dropped and yields the
    /// dispatcher with whatever state was left.
    pub fn spawn(dispatcher: Dispatcher) -> (HubHandle, JoinHandle<Dispatcher>) {
        let (hub, handle) = Self::new(dispatcher);
        (handle, tokio::spawn(hub.run()))
    }

    /// Processes events until every handle is dropped.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Dispatcher {
        info!("Hub event loop started");
        while let Some(event) = self.events.recv().await {
            self.process(event);
        }
        info!(
            rooms = self.dispatcher.registry().len(),
            "Hub event loop stopped"
        );
        self.dispatcher
    }

    fn process(&mut self, event: HubEvent) {
        match event {
            HubEvent::Connected { id, outbox } => {
                debug!(connection = %id, "Connection registered");
                self.outboxes.insert(id, outbox);
            }
            HubEvent::Inbound { id, message } => {
                if !self.outboxes.contains_key(&id) {
                    warn!(connection = %id, "Action from unregistered connection");
                }
                let deliveries = self.dispatcher.handle(id, message);
                self.deliver(deliveries);
            }
            HubEvent::Disconnected { id } => {
                debug!(connection = %id, "Connection closed");
                self.outboxes.remove(&id);
                let deliveries = self.dispatcher.disconnect(id);
                self.deliver(deliveries);
            }
        }
    }

    fn deliver(&self, deliveries: Vec<Delivery>) {
        for Delivery { recipient, message } in deliveries {
            match self.outboxes.get(&recipient) {
                Some(outbox) => {
                    if outbox.send(message).is_err() {
                        warn!(connection = %recipient, "Outbox closed, message dropped");
                    }
                }
                None => debug!(connection = %recipient, "No outbox for recipient"),
            }
        }
    }
}
