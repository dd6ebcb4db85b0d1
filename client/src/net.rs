//! The relay client handle and its IO task.
//!
//! DESIGN
//! ======
//! `RelayClient` is a cheap handle: a bounded outbound queue plus the join
//! handle of one spawned IO task. The task pumps envelopes both ways over a
//! [`Channel`] and reports everything noteworthy — inbound envelopes,
//! disconnects, reconnects, giving up — through a single event stream the
//! owner consumes at its own pace.
//!
//! Sends are fire-and-forget: there is no acknowledgement and no delivery
//! guarantee anywhere in the system, so `send` does not pretend otherwise.
//!
//! LIFECYCLE
//! =========
//! 1. `connect` dials and spawns the IO task
//! 2. `send` enqueues; the task writes to the channel
//! 3. On channel loss: emit `Disconnected`, redial per policy, emit
//!    `Reconnected` or — after the last failed attempt — `Exhausted`
//! 4. `close` drains pending sends, closes the channel, joins the task

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use wire::{Envelope, Event};

use crate::channel::{Channel, ChannelError, WsChannel};
use crate::config::ClientConfig;

/// Capacity of the outbound queue. `send` drops past this.
const OUTBOUND_QUEUE: usize = 256;

/// Capacity of the event stream handed to the owner.
const EVENT_QUEUE: usize = 256;

/// What the IO task reports to the owner.
#[derive(Debug)]
pub enum ClientEvent {
    /// An envelope arrived from the relay.
    Inbound(Envelope),
    /// The connection dropped; reconnection is starting (if configured).
    Disconnected,
    /// A redial succeeded; traffic flows again.
    Reconnected,
    /// Every reconnect attempt failed. Terminal: the task has exited.
    Exhausted,
}

/// Error establishing the initial connection.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("relay connect failed: {0}")]
    Connect(#[from] ChannelError),
}

/// Handle to a live relay connection.
pub struct RelayClient {
    outbound_tx: mpsc::Sender<Envelope>,
    task: JoinHandle<()>,
}

impl RelayClient {
    /// Dial the relay and spawn the IO task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] if the initial dial fails. The
    /// reconnect policy applies only to connections that were established
    /// and then dropped.
    pub async fn connect(config: ClientConfig) -> Result<(Self, mpsc::Receiver<ClientEvent>), ClientError> {
        let channel = WsChannel::dial(&config.url).await?;
        Ok(Self::spawn(Box::new(channel), Some(config)))
    }

    /// Run over an injected channel, without reconnection. This is the test
    /// seam; it also serves transports that manage their own lifetime.
    #[must_use]
    pub fn with_channel(channel: Box<dyn Channel>) -> (Self, mpsc::Receiver<ClientEvent>) {
        Self::spawn(channel, None)
    }

    fn spawn(channel: Box<dyn Channel>, config: Option<ClientConfig>) -> (Self, mpsc::Receiver<ClientEvent>) {
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_QUEUE);
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE);
        let task = tokio::spawn(io_task(channel, config, outbound_rx, event_tx));
        (Self { outbound_tx, task }, event_rx)
    }

    /// Fire-and-forget send. A full queue drops the event with a warning —
    /// matching the delivery guarantees of the rest of the system, which is
    /// to say none.
    pub fn send(&self, event: Event) {
        if self.outbound_tx.try_send(Envelope::new(event)).is_err() {
            warn!("outbound queue full; dropping event");
        }
    }

    /// Flush pending sends, close the channel, and join the IO task.
    pub async fn close(self) {
        drop(self.outbound_tx);
        if self.task.await.is_err() {
            warn!("client io task panicked during shutdown");
        }
    }
}

// =============================================================================
// IO TASK
// =============================================================================

enum PumpEnd {
    /// The owner dropped its handle; shut down cleanly.
    LocalClose,
    /// The channel failed or the relay hung up.
    ChannelDown,
}

async fn io_task(
    mut channel: Box<dyn Channel>,
    config: Option<ClientConfig>,
    mut outbound_rx: mpsc::Receiver<Envelope>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    loop {
        match pump(channel.as_mut(), &mut outbound_rx, &event_tx).await {
            PumpEnd::LocalClose => {
                channel.close().await;
                return;
            }
            PumpEnd::ChannelDown => {
                let _ = event_tx.send(ClientEvent::Disconnected).await;

                // An injected channel has no redial; the owner decides.
                let Some(config) = &config else {
                    return;
                };
                match redial(config, &event_tx).await {
                    Some(fresh) => channel = Box::new(fresh),
                    None => {
                        let _ = event_tx.send(ClientEvent::Exhausted).await;
                        return;
                    }
                }
            }
        }
    }
}

/// Re-establish the connection per the reconnect policy.
async fn redial(config: &ClientConfig, event_tx: &mpsc::Sender<ClientEvent>) -> Option<WsChannel> {
    let policy = config.reconnect;
    for attempt in 1..=policy.max_retries {
        tokio::time::sleep(policy.jittered_backoff(attempt)).await;
        match WsChannel::dial(&config.url).await {
            Ok(channel) => {
                info!(attempt, "reconnected to relay");
                let _ = event_tx.send(ClientEvent::Reconnected).await;
                return Some(channel);
            }
            Err(e) => warn!(attempt, error = %e, "reconnect attempt failed"),
        }
    }
    None
}

/// Pump envelopes both ways until the channel drops or the owner hangs up.
async fn pump(
    channel: &mut dyn Channel,
    outbound_rx: &mut mpsc::Receiver<Envelope>,
    event_tx: &mpsc::Sender<ClientEvent>,
) -> PumpEnd {
    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(envelope) = outbound else {
                    return PumpEnd::LocalClose;
                };
                if let Err(e) = channel.send(&envelope).await {
                    warn!(error = %e, "send failed; connection presumed down");
                    return PumpEnd::ChannelDown;
                }
            }
            inbound = channel.recv() => {
                match inbound {
                    Ok(Some(envelope)) => {
                        let _ = event_tx.send(ClientEvent::Inbound(envelope)).await;
                    }
                    Ok(None) => return PumpEnd::ChannelDown,
                    Err(e) => {
                        warn!(error = %e, "receive failed; connection presumed down");
                        return PumpEnd::ChannelDown;
                    }
                }
            }
        }
    }
}
