//! Image clients
//!
//! Counterparts of the servers in [`crate::server`]: a
//! [`FastImageClient`] subscribes to a fast server, a
//! [`ReliableImageClient`] requests frames from a reliable one.

pub mod fast;
pub mod reliable;

pub use fast::FastImageClient;
pub use reliable::ReliableImageClient;
