//! Socket configuration

use std::time::Duration;

/// Default time a connecting socket waits for its peer
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Socket configuration options
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Give up connecting after this long
    ///
    /// The peer must be listening: connecting sockets keep retrying a
    /// refused connection until this runs out.
    pub connect_timeout: Duration,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SocketConfig {
    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
