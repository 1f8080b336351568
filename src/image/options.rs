//! Per-call frame transmission options

/// Selects which frame sections are transmitted or received
///
/// Applied symmetrically: on send a skipped section goes out empty, on
/// receive a skipped section is read off the wire and discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOptions {
    /// Skip image headers
    pub skip_headers: bool,
    /// Skip image buffers
    pub skip_buffers: bool,
    /// Skip user data
    pub skip_user_data: bool,
}

impl FrameOptions {
    /// Options that transmit everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable skipping of image headers
    pub fn skip_headers(mut self, enable: bool) -> Self {
        self.skip_headers = enable;
        self
    }

    /// Enable or disable skipping of image buffers
    pub fn skip_buffers(mut self, enable: bool) -> Self {
        self.skip_buffers = enable;
        self
    }

    /// Enable or disable skipping of user data
    pub fn skip_user_data(mut self, enable: bool) -> Self {
        self.skip_user_data = enable;
        self
    }
}
