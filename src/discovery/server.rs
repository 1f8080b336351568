//! Discovery service
//!
//! Requests arrive on a router socket and are answered in place:
//!
//! ```text
//!   request:  [identity] version  name  info
//!   register:   true
//!   unregister: true
//!   find:       any_found  count  info*  <empty>
//! ```
//!
//! A request with another protocol version gets no answer at all, so the
//! client sees a timeout.

use bytes::Bytes;

use crate::codec::{push_bool, push_sequence};
use crate::error::{Error, Result};
use crate::protocol::{
    NetworkEntity, ProtocolType, DISCOVERY_PROTOCOL_VERSION, REQUEST_FIND, REQUEST_REGISTER,
    REQUEST_UNREGISTER,
};
use crate::timeout::Timeout;
use crate::transport::{Endpoint, Message, RouterSocket};

use super::info::DiscoveryInfo;
use super::registry::DiscoveryRegistry;

/// Keeps the directory and answers client requests
///
/// Nothing happens between calls to [`process_events`](Self::process_events);
/// requests queue up on the socket until then.
pub struct DiscoveryServer {
    protocol_version: String,
    registry: DiscoveryRegistry,
    socket: Option<RouterSocket>,
}

impl DiscoveryServer {
    /// Create a stopped server with an empty directory
    pub fn new() -> Self {
        Self {
            protocol_version: DISCOVERY_PROTOCOL_VERSION.to_string(),
            registry: DiscoveryRegistry::new(),
            socket: None,
        }
    }

    /// Only answer requests carrying this protocol version
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Bind to `endpoint`, closing any previous socket first
    ///
    /// The directory survives restarts.
    pub async fn startup(&mut self, endpoint: &str) -> Result<()> {
        self.shutdown();

        let socket = RouterSocket::bind(endpoint).await?;
        tracing::info!(
            endpoint = %socket.local_endpoint(),
            version = %self.protocol_version,
            "Discovery server started"
        );
        self.socket = Some(socket);
        Ok(())
    }

    /// Close the socket
    pub fn shutdown(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::info!(endpoint = %socket.local_endpoint(), "Discovery server stopped");
        }
    }

    /// Check if the server is bound
    pub fn is_running(&self) -> bool {
        self.socket.is_some()
    }

    /// Endpoint the server is bound to, once started
    pub fn address(&self) -> Option<&Endpoint> {
        self.socket.as_ref().map(RouterSocket::local_endpoint)
    }

    /// The directory
    pub fn registry(&self) -> &DiscoveryRegistry {
        &self.registry
    }

    /// Answer every pending request
    ///
    /// Waits up to `timeout` for the first request, then handles whatever
    /// else is already queued without waiting. Returns the number of
    /// requests answered; dropped and malformed requests are not counted.
    pub async fn process_events(&mut self, timeout: Timeout) -> Result<usize> {
        let socket = self.socket.as_mut().ok_or(Error::NotStarted)?;
        let mut answered = 0;

        let mut pending = socket.poll(timeout).await?;
        while pending {
            let request = socket.recv().await?;

            match handle_request(&mut self.registry, &self.protocol_version, request) {
                Ok(Some((identity, reply))) => {
                    if let Err(e) = socket.send_to(&identity, reply).await {
                        tracing::warn!(client = ?identity, error = %e, "Reply not delivered");
                    }
                    answered += 1;
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Malformed discovery request"),
            }

            pending = socket.poll(Timeout::Immediate).await?;
        }

        Ok(answered)
    }
}

impl Default for DiscoveryServer {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkEntity for DiscoveryServer {
    fn protocol_type(&self) -> ProtocolType {
        ProtocolType::Discovery
    }

    fn protocol_version(&self) -> &str {
        &self.protocol_version
    }
}

/// Apply one request to the registry and build the reply
///
/// Returns `None` for requests that get no answer.
fn handle_request(
    registry: &mut DiscoveryRegistry,
    expected_version: &str,
    mut request: Message,
) -> Result<Option<(Bytes, Message)>> {
    let identity = request.next_part()?;
    let version = request.next_str()?;
    if version != expected_version {
        tracing::warn!(
            client = ?identity,
            version = %version,
            expected = %expected_version,
            "Protocol version mismatch, request dropped"
        );
        return Ok(None);
    }

    let name = request.next_str()?;
    let info: DiscoveryInfo = request.next_value()?;

    let mut reply = Message::new();
    match name.as_str() {
        REQUEST_REGISTER => push_bool(&mut reply, registry.register(info)),
        REQUEST_UNREGISTER => {
            registry.unregister(&info.address);
            push_bool(&mut reply, true);
        }
        REQUEST_FIND => {
            let found = registry.find(&info);
            tracing::debug!(query = %info, found = found.len(), "Find request");
            push_bool(&mut reply, !found.is_empty());
            push_sequence(&mut reply, &found);
            reply.push_empty();
        }
        other => {
            tracing::warn!(client = ?identity, request = %other, "Unknown discovery request");
            return Ok(None);
        }
    }

    Ok(Some((identity, reply)))
}
