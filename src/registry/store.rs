//! Record Store
//!
//! Direct-lookup map from node address to its membership record. Presence is
//! the map entry itself; there is no zero-value sentinel record.

use crate::domain::{NodeAddress, NodeRecord};
use std::collections::HashMap;

/// Address-keyed record storage with O(1) operations
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<NodeAddress, NodeRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a record by address
    #[inline]
    pub fn get(&self, address: &NodeAddress) -> Option<&NodeRecord> {
        self.records.get(address)
    }

    /// Get a mutable record by address
    #[inline]
    pub fn get_mut(&mut self, address: &NodeAddress) -> Option<&mut NodeRecord> {
        self.records.get_mut(address)
    }

    /// Insert or overwrite the record stored under `address`
    ///
    /// The record's own address must equal the key.
    pub fn put(&mut self, address: NodeAddress, record: NodeRecord) {
        debug_assert_eq!(address, record.address, "record stored under foreign key");
        self.records.insert(address, record);
    }

    /// Remove a record, returning it if it existed
    pub fn delete(&mut self, address: &NodeAddress) -> Option<NodeRecord> {
        self.records.remove(address)
    }

    /// Presence test used by every guard in the registry
    #[inline]
    pub fn contains(&self, address: &NodeAddress) -> bool {
        self.records
            .get(address)
            .is_some_and(|record| record.address == *address)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkDetail, NodeDetails};
    use chrono::Utc;

    fn record(byte: u8) -> NodeRecord {
        NodeRecord::new(
            NodeAddress::new([byte; 20]),
            NodeDetails::new(
                format!("CN=Node{}", byte),
                vec![byte],
                NetworkDetail::new(byte as u64, 1, "localhost", 30303),
            ),
            Utc::now(),
        )
    }

    #[test]
    fn test_put_get_delete() {
        let mut store = RecordStore::new();
        let address = NodeAddress::new([1; 20]);

        assert!(!store.contains(&address));
        assert!(store.get(&address).is_none());

        store.put(address, record(1));
        assert!(store.contains(&address));
        assert_eq!(store.get(&address).unwrap().distinguished_name, "CN=Node1");
        assert_eq!(store.len(), 1);

        let removed = store.delete(&address).unwrap();
        assert_eq!(removed.address, address);
        assert!(!store.contains(&address));
        assert!(store.is_empty());
        assert!(store.delete(&address).is_none());
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut store = RecordStore::new();
        let address = NodeAddress::new([2; 20]);
        store.put(address, record(2));

        let mut updated = record(2);
        updated.host = "10.0.0.2".to_string();
        store.put(address, updated);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&address).unwrap().host, "10.0.0.2");
    }

    #[test]
    fn test_get_mut() {
        let mut store = RecordStore::new();
        let address = NodeAddress::new([3; 20]);
        store.put(address, record(3));

        store.get_mut(&address).unwrap().active = false;
        assert!(!store.get(&address).unwrap().active);
    }
}
