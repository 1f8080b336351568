//! Message sockets
//!
//! Thin adapters over the `zeromq` crate's ZMTP sockets, in two compatible
//! pairs:
//!
//! ```text
//!   PubSocket (bind)    ──── fan-out ────►   SubSocket (connect)
//!   RouterSocket (bind) ◄── addressed ───►   DealerSocket (connect)
//! ```
//!
//! The adapters add what the image and discovery layers need on top:
//! [`Message`] with typed part readers, `poll` with a
//! [`Timeout`](crate::Timeout) followed by `recv`, and connects bounded by
//! [`SocketConfig::connect_timeout`].

pub mod config;
pub mod dealer;
pub mod endpoint;
mod inbox;
pub mod message;
pub mod pubsub;
pub mod router;

pub use config::SocketConfig;
pub use dealer::DealerSocket;
pub use endpoint::Endpoint;
pub use message::Message;
pub use pubsub::{PubSocket, SubSocket};
pub use router::RouterSocket;
