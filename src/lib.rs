//! Node Membership Registry
//!
//! An authoritative registry of network node membership records keyed by a
//! 20-byte node address, mutated only by a single transferable authority
//! and audited through an event stream.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Membership Registry (façade)                      │
//! │        authorize ─► existence guard ─► store + index ─► audit event      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐  ┌──────────────────────┐  ┌──────────────────┐   │
//! │  │   Record Store   │  │  Membership Index    │  │ Access Controller│   │
//! │  │ address → record │  │ Vec + reverse map    │  │ single authority │   │
//! │  │                  │  │ (swap-remove, O(1))  │  │ (transferable)   │   │
//! │  └──────────────────┘  └──────────────────────┘  └──────────────────┘   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │          RegistryEvent broadcast ─► external monitors                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use node_membership_registry::{MembershipRegistry, NetworkDetail, NodeAddress, NodeDetails};
//!
//! let authority = NodeAddress::new([0xa0; 20]);
//! let registry = MembershipRegistry::new(authority);
//! let node: NodeAddress = "0x00112233445566778899aabbccddeeff00112233".parse()?;
//!
//! registry.add(
//!     &authority,
//!     node,
//!     NodeDetails::new("CN=Node1", vec![0x04], NetworkDetail::new(1001, 1, "h1", 30303)),
//! )?;
//! assert!(registry.get(&node)?.active);
//! assert_eq!(registry.list(), vec![node]);
//! # Ok::<(), node_membership_registry::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Record store, membership index, access control and façade
//! - [`domain`]: Addresses, records and trait seams
//! - [`config`]: Registry and logging configuration
//! - [`telemetry`]: Tracing subscriber setup
//! - [`error`]: Error types and handling

pub mod config;
pub mod domain;
pub mod error;
pub mod registry;
pub mod telemetry;

// Re-export commonly used types
pub use config::{LoggingConfig, RegistryConfig};

pub use domain::{
    AccessPolicy, Clock, ManualClock, NetworkDetail, NodeAddress, NodeDetails, NodeRecord,
    SystemClock,
};

pub use error::{Error, Result};

pub use registry::{
    AccessController, MembershipIndex, MembershipRegistry, RecordStore, RegistryEvent,
    RegistryStatsSnapshot,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
