//! Reliable (flow-controlled) image server
//!
//! Clients announce readiness with an empty message before every frame they
//! want. A publish call collects ready signals until enough distinct
//! clients are waiting, then serves all of them.
//!
//! ```text
//!   client A ── <empty> ──┐
//!   client B ── <empty> ──┼──► ready set {A, B}
//!   client A ── <empty> ──┘    (duplicates coalesce)
//!
//!   |ready| >= min_serve before the deadline ──► frame to A and B
//!   otherwise                                ──► nothing sent, error
//! ```
//!
//! Ready signals that arrive while no publish call is running stay queued
//! and count towards the next call. A client that disconnects after
//! signalling cannot be served; the call then still serves every other
//! ready client and reports [`Error::PartialPublish`].

use std::collections::HashSet;

use bytes::Bytes;

use crate::codec::encode_frame;
use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions};
use crate::protocol::{ImageServer, NetworkEntity, ProtocolType};
use crate::timeout::{Deadline, Timeout};
use crate::transport::{Endpoint, Message, RouterSocket};

/// Serves frames only to clients that asked for one
#[derive(Default)]
pub struct ReliableImageServer {
    socket: Option<RouterSocket>,
}

impl ReliableImageServer {
    /// Create a stopped server
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `endpoint`, closing any previous socket first
    pub async fn startup(&mut self, endpoint: &str) -> Result<()> {
        self.shutdown();

        let socket = RouterSocket::bind(endpoint).await?;
        tracing::info!(endpoint = %socket.local_endpoint(), "Reliable image server started");
        self.socket = Some(socket);
        Ok(())
    }

    /// Close the socket and forget pending ready signals
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.local_endpoint(), "Reliable image server stopped");
        }
    }

    /// Check if the server is bound
    pub fn is_running(&self) -> bool {
        self.socket.is_some()
    }
}

/// Gather ready signals until `min_serve` distinct clients are waiting
///
/// Polls at least once. Once the threshold is met only signals that are
/// already queued are added.
async fn collect_ready(
    socket: &mut RouterSocket,
    deadline: &Deadline,
    min_serve: usize,
) -> Result<HashSet<Bytes>> {
    let mut ready = HashSet::new();

    loop {
        let wait = if ready.len() >= min_serve {
            Timeout::Immediate
        } else {
            deadline.remaining()
        };

        let mut pending = socket.poll(wait).await?;
        while pending {
            let mut signal = socket.recv().await?;
            let identity = signal.next_part()?;
            if ready.insert(identity.clone()) {
                tracing::trace!(client = ?identity, "Client ready");
            }
            pending = socket.poll(Timeout::Immediate).await?;
        }

        if ready.len() >= min_serve || deadline.expired() {
            return Ok(ready);
        }
    }
}

/// Send one envelope to every ready client
///
/// Every client is tried even after a failure. Returns the number served,
/// or [`Error::PartialPublish`] if any client could not be reached.
async fn serve_ready(
    socket: &mut RouterSocket,
    ready: &HashSet<Bytes>,
    envelope: &Message,
) -> Result<usize> {
    let mut served = 0;
    for identity in ready {
        match socket.send_to(identity, envelope.clone()).await {
            Ok(()) => served += 1,
            Err(e) => tracing::warn!(client = ?identity, error = %e, "Frame not delivered"),
        }
    }

    match ready.len() - served {
        0 => Ok(served),
        failed => Err(Error::PartialPublish { served, failed }),
    }
}

impl NetworkEntity for ReliableImageServer {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::ReliableImage
    }
}

impl ImageServer for ReliableImageServer {
    fn address(&self) -> Option<&Endpoint> {
        self.socket.as_ref().map(RouterSocket::local_endpoint)
    }

    /// Wait up to `timeout` for `min_serve` ready clients, then serve every
    /// ready client
    ///
    /// Fails with [`Error::InsufficientReady`] without sending anything if
    /// the threshold is not reached in time, and with
    /// [`Error::PartialPublish`] if a ready client left before the send.
    async fn publish(
        &mut self,
        frame: &Frame<'_>,
        timeout: Timeout,
        min_serve: usize,
        options: &FrameOptions,
    ) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;

        let deadline = Deadline::start(timeout);
        let ready = collect_ready(socket, &deadline, min_serve).await?;

        if ready.len() < min_serve {
            tracing::debug!(
                ready = ready.len(),
                required = min_serve,
                "Not enough ready clients, frame not sent"
            );
            return Err(Error::InsufficientReady {
                ready: ready.len(),
                required: min_serve,
            });
        }

        let envelope = encode_frame(frame, options);
        let served = serve_ready(socket, &ready, &envelope).await?;

        tracing::trace!(clients = served, bytes = frame.payload_len(), "Frame published");
        Ok(())
    }
}
