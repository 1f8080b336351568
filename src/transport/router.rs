//! Addressable router socket (binding side)
//!
//! Every message received from a dealer is handed out with the dealer's
//! identity as first part. Replies are routed back with [`RouterSocket::send_to`].

use bytes::Bytes;
use zeromq::{Socket, SocketSend};

use crate::error::{Error, Result};
use crate::timeout::Timeout;

use super::endpoint::Endpoint;
use super::inbox::Inbox;
use super::message::Message;

/// Binding addressable socket
pub struct RouterSocket {
    endpoint: Endpoint,
    inbox: Inbox<zeromq::RouterSocket>,
}

impl RouterSocket {
    /// Bind to an endpoint
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let requested: Endpoint = endpoint.parse()?;
        let mut socket = zeromq::RouterSocket::new();
        let endpoint = requested.bind(&mut socket).await?;

        Ok(Self {
            endpoint,
            inbox: Inbox::new(socket),
        })
    }

    /// Endpoint actually bound
    pub fn local_endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Wait until a message is pending
    pub async fn poll(&mut self, timeout: Timeout) -> Result<bool> {
        self.inbox.poll(timeout).await
    }

    /// Take the next message; its first part is the sender's identity
    pub async fn recv(&mut self) -> Result<Message> {
        self.inbox.recv().await
    }

    /// Send a message to the peer with the given identity
    ///
    /// Fails if no such peer is connected.
    pub async fn send_to(&mut self, identity: &Bytes, msg: Message) -> Result<()> {
        if msg.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let mut routed = msg;
        routed.push_front(identity.clone());
        self.inbox.socket_mut().send(routed.into_zmq()?).await?;
        Ok(())
    }
}
