//! Directory of advertised servers
//!
//! A plain list in registration order. Registering the same record twice
//! keeps both copies; unregistering removes every record at an address.
//! Lookups scan the whole list.

use super::info::DiscoveryInfo;

/// Records known to a discovery server
#[derive(Debug, Clone, Default)]
pub struct DiscoveryRegistry {
    entries: Vec<DiscoveryInfo>,
}

impl DiscoveryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record
    pub fn register(&mut self, info: DiscoveryInfo) -> bool {
        tracing::info!(
            name = %info.name,
            address = %info.address,
            protocol = %info.protocol_type,
            version = %info.protocol_version,
            "Server registered"
        );
        self.entries.push(info);
        true
    }

    /// Remove every record advertised at `address`
    ///
    /// Returns the number of records removed.
    pub fn unregister(&mut self, address: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.address != address);
        let removed = before - self.entries.len();

        if removed > 0 {
            tracing::info!(address = %address, removed = removed, "Server unregistered");
        } else {
            tracing::debug!(address = %address, "Unregister for unknown address");
        }
        removed
    }

    /// Records with the query's name, protocol type and protocol version
    pub fn find(&self, query: &DiscoveryInfo) -> Vec<DiscoveryInfo> {
        self.entries
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect()
    }

    /// All records in registration order
    pub fn entries(&self) -> &[DiscoveryInfo] {
        &self.entries
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no records are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolType;

    fn cam(name: &str, address: &str) -> DiscoveryInfo {
        DiscoveryInfo::new(name, address, ProtocolType::FastImage, "1")
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = DiscoveryRegistry::new();
        assert!(registry.register(cam("cam1", "A")));
        assert!(registry.register(cam("cam2", "B")));

        let found = registry.find(&cam("cam1", "unused"));
        assert_eq!(found, vec![cam("cam1", "A")]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let mut registry = DiscoveryRegistry::new();
        registry.register(cam("cam1", "A"));
        registry.register(cam("cam1", "B"));
        registry.register(cam("cam1", "A"));

        let found = registry.find(&cam("cam1", "unused"));
        let addresses: Vec<&str> = found.iter().map(|i| i.address.as_str()).collect();
        assert_eq!(addresses, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_find_requires_type_and_version() {
        let mut registry = DiscoveryRegistry::new();
        registry.register(cam("cam1", "A"));

        let reliable = DiscoveryInfo::new("cam1", "A", ProtocolType::ReliableImage, "1");
        let newer = DiscoveryInfo::new("cam1", "A", ProtocolType::FastImage, "2");
        assert!(registry.find(&reliable).is_empty());
        assert!(registry.find(&newer).is_empty());
    }

    #[test]
    fn test_unregister_by_address_only() {
        let mut registry = DiscoveryRegistry::new();
        registry.register(cam("cam1", "A"));
        registry.register(cam("cam2", "A"));
        registry.register(cam("cam3", "B"));

        assert_eq!(registry.unregister("A"), 2);
        assert_eq!(registry.entries(), &[cam("cam3", "B")]);
        assert_eq!(registry.unregister("A"), 0);
        assert_eq!(registry.len(), 1);
    }
}
