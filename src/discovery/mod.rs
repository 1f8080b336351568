//! Server discovery
//!
//! Servers advertise a [`DiscoveryInfo`] with a [`DiscoveryServer`];
//! clients look them up by name, protocol type and protocol version through
//! a [`DiscoveryClient`]. Records live until they are unregistered or the
//! discovery server goes away.

pub mod client;
pub mod info;
pub mod registry;
pub mod server;

pub use client::DiscoveryClient;
pub use info::DiscoveryInfo;
pub use registry::DiscoveryRegistry;
pub use server::DiscoveryServer;
