//! Addressable dealer socket (connecting side)

use zeromq::{Socket, SocketSend};

use crate::error::Result;
use crate::timeout::Timeout;

use super::config::SocketConfig;
use super::endpoint::Endpoint;
use super::inbox::Inbox;
use super::message::Message;

/// Connecting addressable socket
pub struct DealerSocket {
    endpoint: Endpoint,
    inbox: Inbox<zeromq::DealerSocket>,
}

impl DealerSocket {
    /// Connect to a router
    pub async fn connect(endpoint: &str, config: &SocketConfig) -> Result<Self> {
        let endpoint: Endpoint = endpoint.parse()?;
        let mut socket = zeromq::DealerSocket::new();
        endpoint.connect(&mut socket, config.connect_timeout).await?;

        Ok(Self {
            endpoint,
            inbox: Inbox::new(socket),
        })
    }

    /// Endpoint this socket connects to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send a message to the router
    pub async fn send(&mut self, msg: Message) -> Result<()> {
        self.inbox.socket_mut().send(msg.into_zmq()?).await?;
        Ok(())
    }

    /// Wait until a message is pending
    pub async fn poll(&mut self, timeout: Timeout) -> Result<bool> {
        self.inbox.poll(timeout).await
    }

    /// Take the next message
    pub async fn recv(&mut self) -> Result<Message> {
        self.inbox.recv().await
    }

    /// Drop every message that has already arrived
    pub async fn discard_pending(&mut self) -> Result<usize> {
        self.inbox.clear().await
    }
}
