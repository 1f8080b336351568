//! Image frames
//!
//! A frame bundles any number of headers, any number of buffers and an
//! opaque user-data string. Headers and buffers travel as independent
//! sequences; keeping them consistent (typically one header per buffer) is
//! up to the caller.

use super::buffer::ImageBuffer;
use super::header::ImageHeader;

/// Headers, buffers and user data sent as one unit
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Image format descriptors
    pub headers: Vec<ImageHeader>,
    /// Image data
    pub buffers: Vec<ImageBuffer<'a>>,
    /// Opaque application data
    pub user_data: String,
}

impl<'a> Frame<'a> {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame from its parts
    pub fn with_parts(
        headers: Vec<ImageHeader>,
        buffers: Vec<ImageBuffer<'a>>,
        user_data: impl Into<String>,
    ) -> Self {
        Self {
            headers,
            buffers,
            user_data: user_data.into(),
        }
    }

    /// Append a header and its buffer
    pub fn push_image(&mut self, header: ImageHeader, buffer: ImageBuffer<'a>) {
        self.headers.push(header);
        self.buffers.push(buffer);
    }

    /// Total number of buffer bytes in the frame
    pub fn payload_len(&self) -> usize {
        self.buffers.iter().map(ImageBuffer::len).sum()
    }

    /// Detach the frame from any borrowed memory
    pub fn to_shared(&self) -> Frame<'static> {
        Frame {
            headers: self.headers.clone(),
            buffers: self.buffers.iter().map(ImageBuffer::to_shared).collect(),
            user_data: self.user_data.clone(),
        }
    }
}
