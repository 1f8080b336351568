//! Fast (lossy) image client

use crate::codec::decode_frame;
use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions};
use crate::protocol::{ImageClient, NetworkEntity, ProtocolType};
use crate::timeout::Timeout;
use crate::transport::{Endpoint, SocketConfig, SubSocket};

/// Receives whatever a fast server publishes while connected
///
/// There is no backlog: frames published before the connection is up, or
/// while the receive queue is full, are never seen.
pub struct FastImageClient {
    config: SocketConfig,
    socket: Option<SubSocket>,
}

impl FastImageClient {
    /// Create a stopped client with default socket settings
    pub fn new() -> Self {
        Self::with_config(SocketConfig::default())
    }

    /// Create a stopped client with custom socket settings
    pub fn with_config(config: SocketConfig) -> Self {
        Self {
            config,
            socket: None,
        }
    }

    /// Connect to `endpoint`, closing any previous connection first
    ///
    /// The server must be listening; fails with
    /// [`Error::Unreachable`] once the connect timeout runs out.
    pub async fn startup(&mut self, endpoint: &str) -> Result<()> {
        self.shutdown();

        let socket = SubSocket::connect(endpoint, &self.config).await?;
        tracing::info!(endpoint = %socket.endpoint(), "Fast image client started");
        self.socket = Some(socket);
        Ok(())
    }

    /// Drop the connection and anything received but not yet read
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.endpoint(), "Fast image client stopped");
        }
    }

    /// Check if the client is started
    pub fn is_running(&self) -> bool {
        self.socket.is_some()
    }

    /// Endpoint the client connects to, once started
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.socket.as_ref().map(SubSocket::endpoint)
    }
}

impl Default for FastImageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkEntity for FastImageClient {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::FastImage
    }
}

impl ImageClient for FastImageClient {
    /// Wait up to `timeout` for the next frame
    ///
    /// Fails with [`Error::Timeout`] if none arrived in time.
    async fn receive(
        &mut self,
        frame: &mut Frame<'_>,
        timeout: Timeout,
        options: &FrameOptions,
    ) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;

        if !socket.poll(timeout).await? {
            return Err(Error::Timeout);
        }

        let mut envelope = socket.recv().await?;
        decode_frame(&mut envelope, frame, options)
    }
}
