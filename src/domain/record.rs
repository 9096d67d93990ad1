//! Membership Records
//!
//! The stored record for a registered node, plus the typed payloads used by
//! the add and update operations.

use super::NodeAddress;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Node Record
// =============================================================================

/// Membership record for a single node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Structured identity string, e.g. `CN=Node1,O=Acme`
    pub distinguished_name: String,
    /// Owning address; always equal to the key it is stored under
    pub address: NodeAddress,
    /// Opaque public key blob
    pub public_key: Bytes,
    /// Status flag, independent of membership
    pub active: bool,
    /// Creation time, immutable after add
    pub joined_at: DateTime<Utc>,
    /// Time of the most recent mutation
    pub last_updated: DateTime<Utc>,
    /// Numeric node serial
    pub serial: u64,
    pub platform_version: u16,
    pub host: String,
    pub port: u16,
}

impl NodeRecord {
    /// Create a freshly joined, active record
    pub fn new(address: NodeAddress, details: NodeDetails, now: DateTime<Utc>) -> Self {
        Self {
            distinguished_name: details.distinguished_name,
            address,
            public_key: details.public_key,
            active: true,
            joined_at: now,
            last_updated: now,
            serial: details.network.serial,
            platform_version: details.network.platform_version,
            host: details.network.host,
            port: details.network.port,
        }
    }

    /// Overwrite name, key and network fields
    ///
    /// `address`, `joined_at` and `active` are left untouched.
    pub fn apply_details(&mut self, details: NodeDetails, now: DateTime<Utc>) {
        self.distinguished_name = details.distinguished_name;
        self.public_key = details.public_key;
        self.apply_network(details.network, now);
    }

    /// Overwrite only the network/platform fields
    pub fn apply_network(&mut self, network: NetworkDetail, now: DateTime<Utc>) {
        self.serial = network.serial;
        self.platform_version = network.platform_version;
        self.host = network.host;
        self.port = network.port;
        self.last_updated = now;
    }

    /// Set the status flag
    pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
        self.active = active;
        self.last_updated = now;
    }

    /// Current name/key/network payload of this record
    pub fn details(&self) -> NodeDetails {
        NodeDetails {
            distinguished_name: self.distinguished_name.clone(),
            public_key: self.public_key.clone(),
            network: self.network(),
        }
    }

    /// Current network/platform payload of this record
    pub fn network(&self) -> NetworkDetail {
        NetworkDetail {
            serial: self.serial,
            platform_version: self.platform_version,
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// `host:port` endpoint
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Mutation Payloads
// =============================================================================

/// Network and platform fields of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDetail {
    pub serial: u64,
    pub platform_version: u16,
    pub host: String,
    pub port: u16,
}

impl NetworkDetail {
    pub fn new(serial: u64, platform_version: u16, host: impl Into<String>, port: u16) -> Self {
        Self {
            serial,
            platform_version,
            host: host.into(),
            port,
        }
    }
}

/// Everything a caller supplies when adding a node or replacing its details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub distinguished_name: String,
    pub public_key: Bytes,
    #[serde(flatten)]
    pub network: NetworkDetail,
}

impl NodeDetails {
    pub fn new(
        distinguished_name: impl Into<String>,
        public_key: impl Into<Bytes>,
        network: NetworkDetail,
    ) -> Self {
        Self {
            distinguished_name: distinguished_name.into(),
            public_key: public_key.into(),
            network,
        }
    }
}
