//! Native relay client for the shared sketch-and-notes board.
//!
//! The connection is an explicitly constructed object with a defined
//! lifecycle — connect, use, close — never a process-wide singleton. The IO
//! seam is the [`channel::Channel`] trait, so tests (and alternative
//! transports) substitute an in-memory fake for the websocket. Reconnection
//! after a dropped connection is an explicit, configurable
//! [`config::ReconnectPolicy`]; exhausting it surfaces a terminal event
//! rather than failing silently.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Client configuration and the reconnect policy |
//! | [`channel`] | Transport seam and the websocket implementation |
//! | [`net`] | The [`net::RelayClient`] handle and its IO task |
//! | [`session`] | [`session::BoardSession`]: a board wired to a client |

pub mod channel;
pub mod config;
pub mod net;
pub mod session;
