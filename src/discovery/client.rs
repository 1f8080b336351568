//! Discovery client

use crate::codec::{read_bool, read_sequence};
use crate::error::{Error, Result};
use crate::protocol::{
    NetworkEntity, ProtocolType, DISCOVERY_PROTOCOL_VERSION, REQUEST_FIND, REQUEST_REGISTER,
    REQUEST_UNREGISTER,
};
use crate::timeout::Timeout;
use crate::transport::{DealerSocket, Endpoint, Message, SocketConfig};

use super::info::DiscoveryInfo;

/// Talks to a [`DiscoveryServer`](super::DiscoveryServer)
///
/// Every call is one request and one reply. A call that times out cannot
/// tell whether the server applied the request; its late reply is thrown
/// away by the next call.
pub struct DiscoveryClient {
    config: SocketConfig,
    protocol_version: String,
    socket: Option<DealerSocket>,
}

impl DiscoveryClient {
    /// Create a stopped client with default socket settings
    pub fn new() -> Self {
        Self::with_config(SocketConfig::default())
    }

    /// Create a stopped client with custom socket settings
    pub fn with_config(config: SocketConfig) -> Self {
        Self {
            config,
            protocol_version: DISCOVERY_PROTOCOL_VERSION.to_string(),
            socket: None,
        }
    }

    /// Send this protocol version with every request
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Connect to `endpoint`, closing any previous connection first
    ///
    /// The server must be listening; fails with
    /// [`Error::Unreachable`] once the connect timeout runs out.
    pub async fn startup(&mut self, endpoint: &str) -> Result<()> {
        self.shutdown();

        let socket = DealerSocket::connect(endpoint, &self.config).await?;
        tracing::info!(endpoint = %socket.endpoint(), "Discovery client started");
        self.socket = Some(socket);
        Ok(())
    }

    /// Close the connection
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.endpoint(), "Discovery client stopped");
        }
    }

    /// Check if the client is started
    pub fn is_running(&self) -> bool {
        self.socket.is_some()
    }

    /// Endpoint the client connects to, once started
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.socket.as_ref().map(DealerSocket::endpoint)
    }

    /// Advertise a server
    ///
    /// Every request fails with [`Error::Parse`] before anything is sent if
    /// `info` does not pass [`DiscoveryInfo::validate`].
    pub async fn register_server(
        &mut self,
        info: &DiscoveryInfo,
        timeout: Timeout,
    ) -> Result<bool> {
        let mut reply = self.request(REQUEST_REGISTER, info, timeout).await?;
        read_bool(&mut reply)
    }

    /// Withdraw every server advertised at `info.address`
    pub async fn unregister_server(
        &mut self,
        info: &DiscoveryInfo,
        timeout: Timeout,
    ) -> Result<bool> {
        let mut reply = self.request(REQUEST_UNREGISTER, info, timeout).await?;
        read_bool(&mut reply)
    }

    /// Servers with the query's name, protocol type and protocol version
    ///
    /// The query's address is not looked at. An empty list means nothing
    /// matched.
    pub async fn find_servers(
        &mut self,
        query: &DiscoveryInfo,
        timeout: Timeout,
    ) -> Result<Vec<DiscoveryInfo>> {
        let mut reply = self.request(REQUEST_FIND, query, timeout).await?;
        let any_found = read_bool(&mut reply)?;
        let found: Vec<DiscoveryInfo> = read_sequence(&mut reply)?;

        if any_found != !found.is_empty() {
            tracing::debug!(any_found, count = found.len(), "Inconsistent find reply");
        }
        Ok(found)
    }

    async fn request(
        &mut self,
        name: &str,
        info: &DiscoveryInfo,
        timeout: Timeout,
    ) -> Result<Message> {
        info.validate()?;

        let mut request = Message::new();
        request.push_text(&self.protocol_version);
        request.push_text(name);
        request.push_text(info);

        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;

        let stale = socket.discard_pending().await?;
        if stale > 0 {
            tracing::debug!(stale, "Discarded late discovery replies");
        }

        socket.send(request).await?;

        if !socket.poll(timeout).await? {
            tracing::debug!(request = %name, "Discovery request timed out");
            return Err(Error::Timeout);
        }
        socket.recv().await
    }
}

impl Default for DiscoveryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkEntity for DiscoveryClient {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::Discovery
    }

    fn protocol_version(&self) -> &str {
        &self.protocol_version
    }
}
