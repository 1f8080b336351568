//! Image frame data model
//!
//! ```text
//!   Frame
//!   ├── headers: [ImageHeader]      text, "w h c bpc name"
//!   ├── buffers: [ImageBuffer]      raw bytes, owned or borrowed
//!   └── user_data: String           opaque
//! ```
//!
//! `FrameOptions` selects which of the three sections a send or receive
//! call actually transfers.

pub mod buffer;
pub mod frame;
pub mod header;
pub mod options;

pub use buffer::ImageBuffer;
pub use frame::Frame;
pub use header::ImageHeader;
pub use options::FrameOptions;
