//! Transport seam between the client and the relay.
//!
//! [`Channel`] is the injectable boundary: the production implementation is
//! a websocket, tests use an in-memory pair. The IO task in [`crate::net`]
//! only ever talks to the trait.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::warn;

use wire::Envelope;

/// Error crossing the transport seam.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying transport failed (dial, send, or receive).
    #[error("transport failure: {0}")]
    Transport(String),
    /// An envelope could not be encoded for sending.
    #[error(transparent)]
    Codec(#[from] wire::CodecError),
}

/// A bidirectional envelope channel to the relay.
#[async_trait]
pub trait Channel: Send {
    /// Send one envelope. An error means the connection is down.
    async fn send(&mut self, envelope: &Envelope) -> Result<(), ChannelError>;

    /// Receive the next envelope. `Ok(None)` means the peer closed cleanly.
    async fn recv(&mut self) -> Result<Option<Envelope>, ChannelError>;

    /// Close the channel. Best-effort; errors are not interesting here.
    async fn close(&mut self);
}

// =============================================================================
// WEBSOCKET CHANNEL
// =============================================================================

/// The production channel: a websocket connection to the relay.
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsChannel {
    /// Dial the relay.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Transport`] if the websocket handshake fails.
    pub async fn dial(url: &str) -> Result<Self, ChannelError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        Ok(Self { stream })
    }
}

#[async_trait]
impl Channel for WsChannel {
    async fn send(&mut self, envelope: &Envelope) -> Result<(), ChannelError> {
        let json = wire::encode(envelope)?;
        self.stream
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Option<Envelope>, ChannelError> {
        loop {
            let Some(msg) = self.stream.next().await else {
                return Ok(None);
            };
            let msg = msg.map_err(|e| ChannelError::Transport(e.to_string()))?;
            match msg {
                Message::Text(text) => match wire::decode(text.as_str()) {
                    Ok(envelope) => return Ok(Some(envelope)),
                    // One bad frame stays one bad frame; keep receiving.
                    Err(e) => warn!(error = %e, "dropping malformed inbound envelope"),
                },
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.stream.close(None).await;
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
