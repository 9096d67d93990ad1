//! Enumeration Index
//!
//! Insertion-ordered list of member addresses plus a reverse
//! address → position map. Removal swaps the last entry into the vacated
//! slot and truncates, so it stays O(1) but does not preserve join order
//! once anything has been removed.

use crate::domain::NodeAddress;
use std::collections::HashMap;

/// Enumerable membership list with O(1) swap-remove
#[derive(Debug, Default)]
pub struct MembershipIndex {
    /// Member addresses, dense, no duplicates
    members: Vec<NodeAddress>,
    /// Position of each address in `members`
    positions: HashMap<NodeAddress, usize>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an address to the end of the list
    ///
    /// Returns false (and changes nothing) if the address is already indexed.
    pub fn append(&mut self, address: NodeAddress) -> bool {
        if self.positions.contains_key(&address) {
            return false;
        }
        self.positions.insert(address, self.members.len());
        self.members.push(address);
        true
    }

    /// Remove an address by moving the last entry into its slot
    ///
    /// Returns false if the address is not indexed.
    pub fn remove(&mut self, address: &NodeAddress) -> bool {
        let Some(position) = self.positions.remove(address) else {
            return false;
        };

        let last = self.members.len() - 1;
        if position != last {
            let moved = self.members[last];
            self.members[position] = moved;
            self.positions.insert(moved, position);
        }
        self.members.truncate(last);
        true
    }

    /// Current position of an address
    #[inline]
    pub fn position(&self, address: &NodeAddress) -> Option<usize> {
        self.positions.get(address).copied()
    }

    /// Borrow the current member sequence
    #[inline]
    pub fn as_slice(&self) -> &[NodeAddress] {
        &self.members
    }

    /// Materialized snapshot of the current member sequence
    pub fn all(&self) -> Vec<NodeAddress> {
        self.members.clone()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check that list and reverse map agree
    pub fn is_consistent(&self) -> bool {
        self.members.len() == self.positions.len()
            && self
                .members
                .iter()
                .enumerate()
                .all(|(i, address)| self.positions.get(address) == Some(&i))
    }
}
