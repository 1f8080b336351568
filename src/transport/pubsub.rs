//! Fan-out publish/subscribe sockets
//!
//! `PubSocket::send` hands a message to every subscriber's queue and returns
//! at once. A subscriber whose queue is full misses the message; a
//! subscriber that connects later never sees it. Subscribers take every
//! message (empty topic filter).

use zeromq::{Socket, SocketSend};

use crate::error::Result;
use crate::timeout::Timeout;

use super::config::SocketConfig;
use super::endpoint::Endpoint;
use super::inbox::Inbox;
use super::message::Message;

/// Binding fan-out sender
pub struct PubSocket {
    endpoint: Endpoint,
    socket: zeromq::PubSocket,
}

impl PubSocket {
    /// Bind to an endpoint
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let requested: Endpoint = endpoint.parse()?;
        let mut socket = zeromq::PubSocket::new();
        let endpoint = requested.bind(&mut socket).await?;

        Ok(Self { endpoint, socket })
    }

    /// Endpoint actually bound
    pub fn local_endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Queue a message for every subscriber without waiting
    pub async fn send(&mut self, msg: Message) -> Result<()> {
        self.socket.send(msg.into_zmq()?).await?;
        Ok(())
    }
}

/// Connecting fan-out receiver
pub struct SubSocket {
    endpoint: Endpoint,
    inbox: Inbox<zeromq::SubSocket>,
}

impl SubSocket {
    /// Connect to a publisher and subscribe to everything
    pub async fn connect(endpoint: &str, config: &SocketConfig) -> Result<Self> {
        let endpoint: Endpoint = endpoint.parse()?;
        let mut socket = zeromq::SubSocket::new();
        endpoint.connect(&mut socket, config.connect_timeout).await?;
        socket.subscribe("").await?;

        Ok(Self {
            endpoint,
            inbox: Inbox::new(socket),
        })
    }

    /// Endpoint this socket connects to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Wait until a message is pending
    pub async fn poll(&mut self, timeout: Timeout) -> Result<bool> {
        self.inbox.poll(timeout).await
    }

    /// Take the next message
    pub async fn recv(&mut self) -> Result<Message> {
        self.inbox.recv().await
    }
}
