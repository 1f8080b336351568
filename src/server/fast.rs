//! Fast (lossy) image server

use crate::codec::encode_frame;
use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions};
use crate::protocol::{ImageServer, NetworkEntity, ProtocolType};
use crate::timeout::Timeout;
use crate::transport::{Endpoint, PubSocket};

/// Publishes frames to every connected client without acknowledgement
///
/// A client that is slow, or connects after a frame went out, misses it.
#[derive(Default)]
pub struct FastImageServer {
    socket: Option<PubSocket>,
}

impl FastImageServer {
    /// Create a stopped server
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `endpoint`, closing any previous socket first
    pub async fn startup(&mut self, endpoint: &str) -> Result<()> {
        self.shutdown();

        let socket = PubSocket::bind(endpoint).await?;
        tracing::info!(endpoint = %socket.local_endpoint(), "Fast image server started");
        self.socket = Some(socket);
        Ok(())
    }

    /// Close the socket; a stopped server stays stopped
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.local_endpoint(), "Fast image server stopped");
        }
    }

    /// Check if the server is bound
    pub fn is_running(&self) -> bool {
        self.socket.is_some()
    }

    /// Send a frame to all connected clients
    ///
    /// Zero clients is not an error.
    pub async fn publish_frame(&mut self, frame: &Frame<'_>, options: &FrameOptions) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;
        let envelope = encode_frame(frame, options);

        socket.send(envelope).await?;
        tracing::trace!(bytes = frame.payload_len(), "Frame published");
        Ok(())
    }
}

impl NetworkEntity for FastImageServer {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::FastImage
    }
}

impl ImageServer for FastImageServer {
    fn address(&self) -> Option<&Endpoint> {
        self.socket.as_ref().map(PubSocket::local_endpoint)
    }

    /// Never waits; `timeout` and `min_serve` are ignored
    async fn publish(
        &mut self,
        frame: &Frame<'_>,
        _timeout: Timeout,
        _min_serve: usize,
        options: &FrameOptions,
    ) -> Result<()> {
        self.publish_frame(frame, options).await
    }
}
