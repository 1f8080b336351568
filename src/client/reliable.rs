//! Reliable (flow-controlled) image client

use crate::codec::decode_frame;
use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions};
use crate::protocol::{ImageClient, NetworkEntity, ProtocolType};
use crate::timeout::Timeout;
use crate::transport::{DealerSocket, Endpoint, Message, SocketConfig};

/// Requests one frame at a time from a reliable server
///
/// Each receive call first sends a ready signal. A call that times out does
/// not take its signal back, so the server may later serve a frame that the
/// next receive call picks up.
pub struct ReliableImageClient {
    config: SocketConfig,
    socket: Option<DealerSocket>,
}

impl ReliableImageClient {
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

        let socket = DealerSocket::connect(endpoint, &self.config).await?;
        tracing::info!(endpoint = %socket.endpoint(), "Reliable image client started");
        self.socket = Some(socket);
        Ok(())
    }

    /// Drop the connection, pending ready signals and unread frames
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.endpoint(), "Reliable image client stopped");
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
}

impl Default for ReliableImageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkEntity for ReliableImageClient {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::ReliableImage
    }
}

impl ImageClient for ReliableImageClient {
    /// Signal readiness, then wait up to `timeout` for a frame
    async fn receive(
        &mut self,
        frame: &mut Frame<'_>,
        timeout: Timeout,
        options: &FrameOptions,
    ) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;

        socket.send(Message::empty_part()).await?;

        if !socket.poll(timeout).await? {
            return Err(Error::Timeout);
        }

        let mut envelope = socket.recv().await?;
        decode_frame(&mut envelope, frame, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RouterSocket;
    use std::time::Duration;

    #[tokio::test]
    async fn test_receive_before_startup() {
        let mut client = ReliableImageClient::new();
        let mut frame = Frame::new();

        let result = client
            .receive(&mut frame, Timeout::Immediate, &FrameOptions::new())
            .await;
        assert!(matches!(result, Err(Error::NotStarted)));
        assert_eq!(client.protocol_type(), ProtocolType::ReliableImage);
    }

    #[tokio::test]
    async fn test_startup_without_server() {
        let config = SocketConfig::default().connect_timeout(Duration::from_millis(50));
        let mut client = ReliableImageClient::with_config(config);

        assert!(matches!(
            client.startup("tcp://127.0.0.1:1").await,
            Err(Error::Unreachable(_))
        ));
        assert!(!client.is_running());
    }

    #[tokio::test]
    async fn test_timed_out_receive_leaves_ready_signal() {
        let mut router = RouterSocket::bind("tcp://127.0.0.1:0").await.unwrap();
        let endpoint = router.local_endpoint().to_string();

        let mut client = ReliableImageClient::new();
        client.startup(&endpoint).await.unwrap();

        let mut frame = Frame::new();
        let err = client
            .receive(&mut frame, Timeout::Immediate, &FrameOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        // The signal is a single empty part behind the client's identity
        assert!(router.poll(Timeout::from_millis(2000)).await.unwrap());
        let mut signal = router.recv().await.unwrap();
        signal.next_part().unwrap();
        assert!(signal.next_part().unwrap().is_empty());
        assert!(signal.is_empty());
    }
}
