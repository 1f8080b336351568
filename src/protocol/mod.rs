//! Protocol roles and constants

pub mod constants;
pub mod entity;

pub use constants::*;
pub use entity::{ImageClient, ImageServer, NetworkEntity, ProtocolType};
