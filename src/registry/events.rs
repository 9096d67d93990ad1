//! Registry Events
//!
//! Audit events emitted by the membership registry, exactly one per
//! successful mutation, for external monitors to react to.

use crate::domain::NodeAddress;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Events emitted by the membership registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// A node was added
    #[serde(rename_all = "camelCase")]
    NodeAdded {
        address: NodeAddress,
        distinguished_name: String,
    },

    /// A node was removed
    NodeRemoved { address: NodeAddress },

    /// A node's status or details changed
    NodeUpdated { address: NodeAddress },

    /// Registry authority was handed over
    AuthorityTransferred {
        previous: NodeAddress,
        new: NodeAddress,
    },
}

impl RegistryEvent {
    /// Get the node address this event concerns
    ///
    /// Authority transfers report the new authority.
    pub fn address(&self) -> &NodeAddress {
        match self {
            RegistryEvent::NodeAdded { address, .. } => address,
            RegistryEvent::NodeRemoved { address } => address,
            RegistryEvent::NodeUpdated { address } => address,
            RegistryEvent::AuthorityTransferred { new, .. } => new,
        }
    }

    /// Check if this is a membership-level event
    pub fn is_membership_event(&self) -> bool {
        matches!(
            self,
            RegistryEvent::NodeAdded { .. }
                | RegistryEvent::NodeRemoved { .. }
                | RegistryEvent::NodeUpdated { .. }
        )
    }

    /// Short event name for logs and metrics labels
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryEvent::NodeAdded { .. } => "added",
            RegistryEvent::NodeRemoved { .. } => "removed",
            RegistryEvent::NodeUpdated { .. } => "updated",
            RegistryEvent::AuthorityTransferred { .. } => "authority_transferred",
        }
    }

    /// Encode as a single JSON line
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_address() {
        let address = NodeAddress::new([1; 20]);
        let event = RegistryEvent::NodeAdded {
            address,
            distinguished_name: "CN=Node1".to_string(),
        };
        assert_eq!(event.address(), &address);
        assert!(event.is_membership_event());
        assert_eq!(event.kind(), "added");
    }

    #[test]
    fn test_authority_event() {
        let event = RegistryEvent::AuthorityTransferred {
            previous: NodeAddress::new([1; 20]),
            new: NodeAddress::new([2; 20]),
        };
        assert_eq!(event.address(), &NodeAddress::new([2; 20]));
        assert!(!event.is_membership_event());
    }

    #[test]
    fn test_event_json_shape() {
        let event = RegistryEvent::NodeAdded {
            address: NodeAddress::new([0x11; 20]),
            distinguished_name: "CN=Node1".to_string(),
        };
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "nodeAdded");
        assert_eq!(json["address"], format!("0x{}", "11".repeat(20)));
        assert_eq!(json["distinguishedName"], "CN=Node1");
    }
}
