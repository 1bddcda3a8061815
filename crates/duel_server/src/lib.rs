//! Duel server - rooms, routing and the WebSocket host for two-player tic-tac-toe.
//!
//! # Architecture
//!
//! - **Registry**: room token -> game, owns room creation and destruction
//! - **Router**: connection -> room token
//! - **Dispatcher**: applies one player action and says who hears about it
//! - **Hub**: single event loop that owns the dispatcher and all outboxes
//! - **WebSocket**: per-socket reader/writer tasks feeding the hub
//!
//! # Example
//!
//! ```
//! use duel_server::{ClientMessage, Dispatcher, ServerMessage};
//! use duel_tictactoe::{ConnectionId, Symbol};
//!
//! let mut dispatcher = Dispatcher::default();
//! let host = ConnectionId::new(1);
//! let deliveries = dispatcher.handle(host, ClientMessage::CreateRoom);
//! assert!(matches!(
//!     deliveries[0].message,
//!     ServerMessage::RoomJoined { symbol: Symbol::X, .. }
//! ));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod dispatcher;
mod hub;
mod protocol;
mod registry;
mod router;
mod ws;

// Crate-level exports - Transport
pub use app::build_router;
pub use hub::{Hub, HubClosed, HubEvent, HubHandle, Outbox};
pub use ws::{FrameOutcome, handle_frame, read_frames, write_messages, ws_handler};

// Crate-level exports - Configuration
pub use cli::Cli;
pub use config::{ConfigError, PORT_ENV, ServerConfig};

// Crate-level exports - Room management
pub use dispatcher::{Delivery, Dispatcher};
pub use registry::{
    DEFAULT_MAX_TOKEN_ATTEMPTS, DEFAULT_TOKEN_BYTES, RandomTokens, RegistryError, RoomRegistry,
    TOKEN_BYTES_RANGE, TokenSource,
};
pub use router::ConnectionRouter;

// Crate-level exports - Wire protocol
pub use protocol::{ClientMessage, INVALID_MESSAGE, ROOM_UNAVAILABLE, ServerMessage};
