//! # imagebabble
//!
//! Send and receive image frames over the network.
//!
//! A [`Frame`] carries any number of image headers, any number of raw image
//! buffers and an opaque user-data string. Frames are published by a server
//! and received by clients in one of two modes:
//!
//! - **Fast**: fan-out to every connected client without waiting. Frames can
//!   be lost and late joiners see nothing of the past.
//! - **Reliable**: clients ask for each frame. A publish call waits until
//!   enough clients are ready and then serves all of them, or none.
//!
//! A small discovery service lets servers advertise themselves by name.
//!
//! ## Example
//!
//! ```no_run
//! use imagebabble::{
//!     FastImageClient, FastImageServer, Frame, FrameOptions, ImageClient, ImageHeader,
//!     ImageServer, Timeout,
//! };
//!
//! #[tokio::main]
//! async fn main() -> imagebabble::Result<()> {
//!     let mut server = FastImageServer::new();
//!     server.startup("tcp://127.0.0.1:5562").await?;
//!
//!     let mut client = FastImageClient::new();
//!     client.startup("tcp://127.0.0.1:5562").await?;
//!
//!     let mut frame = Frame::new();
//!     frame.push_image(ImageHeader::new(640, 480, 1, 1, "gray"), vec![0u8; 640 * 480].into());
//!     server.publish(&frame, Timeout::Immediate, 0, &FrameOptions::new()).await?;
//!
//!     let mut received = Frame::new();
//!     client.receive(&mut received, Timeout::from_millis(100), &FrameOptions::new()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`image`]: frame data model
//! - [`codec`]: frame envelopes
//! - [`transport`]: ZeroMQ message sockets
//! - [`server`] / [`client`]: fast and reliable image entities
//! - [`discovery`]: server directory

pub mod client;
pub mod codec;
pub mod discovery;
pub mod error;
pub mod image;
pub mod protocol;
pub mod server;
pub mod timeout;
pub mod transport;

pub use client::{FastImageClient, ReliableImageClient};
pub use discovery::{DiscoveryClient, DiscoveryInfo, DiscoveryRegistry, DiscoveryServer};
pub use error::{Error, Result};
pub use image::{Frame, FrameOptions, ImageBuffer, ImageHeader};
pub use protocol::{
    ImageClient, ImageServer, NetworkEntity, ProtocolType, DEFAULT_DISCOVERY_ENDPOINT,
    DEFAULT_IMAGE_ENDPOINT, DISCOVERY_PROTOCOL_VERSION, IMAGE_PROTOCOL_VERSION,
};
pub use server::{FastImageServer, ReliableImageServer};
pub use timeout::Timeout;
pub use transport::{Endpoint, SocketConfig};
