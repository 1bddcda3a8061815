//! WebSocket transport: one reader loop and one writer task per socket.

use crate::hub::{HubHandle, Outbox};
use crate::protocol::{ClientMessage, ServerMessage};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use duel_tictactoe::ConnectionId;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// What the reader loop does after one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep reading.
    Continue,
    /// Stop reading; the connection is done.
    Close,
}

/// Upgrades `GET /ws` and hands the socket to the hub.
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<HubHandle>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

#[instrument(skip_all, fields(connection = tracing::field::Empty))]
async fn handle_socket(socket: WebSocket, hub: HubHandle) {
    let id = hub.next_connection_id();
    tracing::Span::current().record("connection", id.get());
    info!("WebSocket client connected");

    let (sender, receiver) = socket.split();
    let (outbox, rx) = mpsc::unbounded_channel::<ServerMessage>();

    if hub.connect(id, outbox.clone()).is_err() {
        error!("Hub is not running, dropping connection");
        return;
    }

    let writer = tokio::spawn(write_messages(rx, sender));
    read_frames(id, receiver, &hub, &outbox).await;

    // The writer stops once both this sender and the hub's copy are gone.
    drop(outbox);
    if let Err(e) = writer.await {
        warn!(error = %e, "Writer task failed");
    }
    info!("WebSocket client disconnected");
}

/// Encodes each outbound message as a JSON text frame until the outbox
/// closes or the sink refuses a frame.
pub async fn write_messages<S>(mut rx: mpsc::UnboundedReceiver<ServerMessage>, mut sink: S)
where
    S: Sink<Message> + Unpin,
{
    while let Some(message) = rx.recv().await {
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Failed to encode message");
                continue;
            }
        };
        if sink.send(Message::Text(text.into())).await.is_err() {
            debug!("Socket closed, writer stopping");
            break;
        }
    }
}

/// Feeds frames to the hub until the stream closes, then reports the
/// disconnect.
pub async fn read_frames<S>(id: ConnectionId, mut frames: S, hub: &HubHandle, outbox: &Outbox)
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    while let Some(frame) = frames.next().await {
        if handle_frame(id, frame, hub, outbox) == FrameOutcome::Close {
            break;
        }
    }

    if hub.disconnect(id).is_err() {
        debug!(connection = %id, "Hub already stopped, disconnect not delivered");
    }
}

/// Handles one inbound frame from `id`.
///
/// Text frames are decoded and forwarded to the hub. Undecodable text is
/// answered with `INVALID_MESSAGE` on `outbox` only. Binary, ping and pong
/// frames are ignored.
pub fn handle_frame(
    id: ConnectionId,
    frame: Result<Message, axum::Error>,
    hub: &HubHandle,
    outbox: &Outbox,
) -> FrameOutcome {
    match frame {
        Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(message) => {
                debug!(connection = %id, ?message, "Action received");
                if hub.submit(id, message).is_err() {
                    error!(connection = %id, "Hub stopped while connection was open");
                    return FrameOutcome::Close;
                }
                FrameOutcome::Continue
            }
            Err(e) => {
                warn!(connection = %id, error = %e, "Undecodable frame");
                if outbox.send(ServerMessage::invalid_message(e)).is_err() {
                    debug!(connection = %id, "Outbox closed, error reply dropped");
                }
                FrameOutcome::Continue
            }
        },
        Ok(Message::Close(_)) => FrameOutcome::Close,
        Ok(_) => FrameOutcome::Continue,
        Err(e) => {
            debug!(connection = %id, error = %e, "Socket error");
            FrameOutcome::Close
        }
    }
}
