//! Image servers
//!
//! - [`FastImageServer`]: fan-out to every connected client, no waiting,
//!   frames may be lost
//! - [`ReliableImageServer`]: waits for clients to signal readiness and
//!   serves all ready clients or none

pub mod fast;
pub mod reliable;

pub use fast::FastImageServer;
pub use reliable::ReliableImageServer;
