//! Transport endpoints
//!
//! Endpoints are written `tcp://host:port`. A `*` host binds every
//! interface; port `0` lets the OS pick one, and the bound endpoint a
//! socket reports carries the port actually chosen.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use zeromq::Socket;

use crate::error::{Error, Result};

const TCP_SCHEME: &str = "tcp://";

/// A parsed `tcp://host:port` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host part (`*` is kept as written)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Address handed to the socket library when binding
    fn bind_address(&self) -> String {
        if self.host == "*" {
            Endpoint::new("0.0.0.0", self.port).to_string()
        } else {
            self.to_string()
        }
    }

    /// Bind `socket` here and return the endpoint actually bound
    pub(crate) async fn bind<S: Socket>(&self, socket: &mut S) -> Result<Endpoint> {
        let bound = socket.bind(&self.bind_address()).await?;
        bound.to_string().parse()
    }

    /// Connect `socket` to this endpoint, giving up after `timeout`
    pub(crate) async fn connect<S: Socket>(&self, socket: &mut S, timeout: Duration) -> Result<()> {
        let address = self.to_string();
        match tokio::time::timeout(timeout, socket.connect(&address)).await {
            Ok(connected) => Ok(connected?),
            Err(_) => Err(Error::Unreachable(address)),
        }
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self {
            host: addr.ip().to_string(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "{}[{}]:{}", TCP_SCHEME, self.host, self.port)
        } else {
            write!(f, "{}{}:{}", TCP_SCHEME, self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidEndpoint(s.to_string());

        let rest = s.strip_prefix(TCP_SCHEME).ok_or_else(invalid)?;
        let (host, port) = rest.rsplit_once(':').ok_or_else(invalid)?;
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        if host.is_empty() {
            return Err(invalid());
        }
        let port = port.parse().map_err(|_| invalid())?;

        Ok(Self::new(host, port))
    }
}
