//! Error types
//!
//! Every fallible operation in the crate returns [`Result`]. Timeouts are
//! reported as [`Error::Timeout`] so callers that only care about success can
//! treat every `Err` alike, while callers that care can match on the variant.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error type
#[derive(Debug, Error)]
pub enum Error {
    /// The socket library failed to bind, connect, send or receive
    #[error("transport error: {0}")]
    Transport(#[from] zeromq::ZmqError),

    /// Endpoint string could not be parsed
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// No peer accepted the connection within the connect timeout
    #[error("could not connect to {0}")]
    Unreachable(String),

    /// Nothing arrived within the requested time window
    #[error("operation timed out")]
    Timeout,

    /// Entity used before `startup()`
    #[error("not started")]
    NotStarted,

    /// A message ended before all expected parts were read
    #[error("message is missing a part")]
    MissingPart,

    /// A text part could not be parsed, or a value has no valid text form
    #[error("parse error: {0}")]
    Parse(String),

    /// Incoming buffer did not fit into caller-supplied memory
    #[error("buffer {index}: received {received} bytes into capacity {capacity}")]
    CapacityExceeded {
        /// Position of the buffer in the frame
        index: usize,
        /// Capacity of the borrowed region
        capacity: usize,
        /// Size of the incoming part
        received: usize,
    },

    /// Reliable publish did not collect enough ready clients in time
    #[error("only {ready} of {required} clients ready")]
    InsufficientReady {
        /// Distinct ready connections observed
        ready: usize,
        /// Threshold requested by the caller
        required: usize,
    },

    /// Reliable publish reached only some of the ready clients
    ///
    /// The `served` clients have the frame; the others left between
    /// signalling readiness and the send.
    #[error("frame delivered to {served} clients, {failed} failed")]
    PartialPublish {
        /// Clients the frame was handed to
        served: usize,
        /// Ready clients that could not be reached
        failed: usize,
    },

    /// Attempt to send a message without parts
    #[error("message has no parts")]
    EmptyMessage,
}

impl Error {
    /// Check whether this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }

    pub(crate) fn parse(msg: impl std::fmt::Display) -> Self {
        Error::Parse(msg.to_string())
    }
}
