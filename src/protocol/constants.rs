//! Protocol constants

/// Version string spoken by image servers and clients
pub const IMAGE_PROTOCOL_VERSION: &str = "1";

/// Version string spoken by the discovery service
pub const DISCOVERY_PROTOCOL_VERSION: &str = "1";

/// Conventional endpoint of an image server
pub const DEFAULT_IMAGE_ENDPOINT: &str = "tcp://127.0.0.1:5562";

/// Conventional endpoint of the discovery service
pub const DEFAULT_DISCOVERY_ENDPOINT: &str = "tcp://127.0.0.1:6000";

/// Address advertised by entities that do not accept connections
pub const UNUSED_ADDRESS: &str = "unused";

// Discovery request names
pub const REQUEST_REGISTER: &str = "register";
pub const REQUEST_UNREGISTER: &str = "unregister";
pub const REQUEST_FIND: &str = "find";
