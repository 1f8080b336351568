//! Roles shared by servers and clients
//!
//! Every entity on the network speaks one [`ProtocolType`] at one version.
//! Image servers and clients come in a fast and a reliable flavor, picked
//! by constructing the concrete type; code that does not care which one it
//! holds can be written against [`ImageServer`] / [`ImageClient`].

use std::fmt;
use std::future::Future;

use crate::error::{Error, Result};
use crate::image::{Frame, FrameOptions};
use crate::timeout::Timeout;
use crate::transport::Endpoint;

use super::constants::IMAGE_PROTOCOL_VERSION;

/// Protocol spoken by a network entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolType {
    /// Lossy fan-out of image frames
    FastImage,
    /// Flow-controlled delivery to ready clients
    ReliableImage,
    /// Server directory
    Discovery,
    /// Application defined
    User,
}

impl ProtocolType {
    /// Numeric code used on the wire
    pub fn code(self) -> i32 {
        match self {
            ProtocolType::FastImage => 0,
            ProtocolType::ReliableImage => 1,
            ProtocolType::Discovery => 2,
            ProtocolType::User => 100,
        }
    }

    /// Look up a protocol by its numeric code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ProtocolType::FastImage),
            1 => Some(ProtocolType::ReliableImage),
            2 => Some(ProtocolType::Discovery),
            100 => Some(ProtocolType::User),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for ProtocolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code: i32 = s
            .trim()
            .parse()
            .map_err(|_| Error::parse(format!("protocol type {:?}", s)))?;
        Self::from_code(code)
            .ok_or_else(|| Error::parse(format!("unknown protocol type {}", code)))
    }
}

/// Anything that talks on the network
pub trait NetworkEntity {
    /// Protocol spoken
    fn protocol_type(&self) -> ProtocolType;

    /// Protocol version spoken
    fn protocol_version(&self) -> &str {
        IMAGE_PROTOCOL_VERSION
    }
}

/// Publishes frames to clients
pub trait ImageServer: NetworkEntity {
    /// Endpoint the server is bound to, once started
    fn address(&self) -> Option<&Endpoint>;

    /// Publish a frame
    ///
    /// `timeout` and `min_serve` only matter to servers that wait for
    /// clients before sending.
    fn publish(
        &mut self,
        frame: &Frame<'_>,
        timeout: Timeout,
        min_serve: usize,
        options: &FrameOptions,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Receives frames from a server
pub trait ImageClient: NetworkEntity {
    /// Receive the next frame into `frame`
    fn receive(
        &mut self,
        frame: &mut Frame<'_>,
        timeout: Timeout,
        options: &FrameOptions,
    ) -> impl Future<Output = Result<()>> + Send;
}
