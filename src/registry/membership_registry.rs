//! Membership Registry
//!
//! The public façade over the record store, the enumeration index and the
//! access controller. Every mutation runs under one write lock: authorize,
//! check existence, update store and index together, then emit exactly one
//! audit event. A failed precondition returns before anything is written.

use super::access::AccessController;
use super::events::RegistryEvent;
use super::index::MembershipIndex;
use super::store::RecordStore;
use crate::config::RegistryConfig;
use crate::domain::{
    AccessPolicy, Clock, NetworkDetail, NodeAddress, NodeDetails, NodeRecord, SystemClock,
};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

// =============================================================================
// Registry State
// =============================================================================

/// All mutable registry state, guarded as one unit
#[derive(Debug)]
struct RegistryState {
    store: RecordStore,
    index: MembershipIndex,
    access: AccessController,
    /// Last timestamp handed to a mutation
    last_stamp: Option<DateTime<Utc>>,
}

impl RegistryState {
    fn new(authority: NodeAddress) -> Self {
        Self {
            store: RecordStore::new(),
            index: MembershipIndex::new(),
            access: AccessController::new(authority),
            last_stamp: None,
        }
    }

    /// Next mutation timestamp, strictly after the previous one
    fn stamp(&mut self, clock: &dyn Clock) -> DateTime<Utc> {
        let mut now = clock.now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }

    fn require_authority(&self, caller: &NodeAddress) -> Result<()> {
        if self.access.authorize(caller) {
            Ok(())
        } else {
            Err(Error::Unauthorized { caller: *caller })
        }
    }

    fn require_present(&self, address: &NodeAddress) -> Result<()> {
        if self.store.contains(address) {
            Ok(())
        } else {
            Err(Error::NotFound { address: *address })
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Lifetime counters for the registry
#[derive(Debug, Default)]
pub struct RegistryStats {
    pub additions: AtomicU64,
    pub removals: AtomicU64,
    pub updates: AtomicU64,
    pub authority_transfers: AtomicU64,
    /// Calls rejected by a precondition
    pub rejected: AtomicU64,
}

/// Snapshot of registry statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStatsSnapshot {
    pub total_members: u64,
    pub active_members: u64,
    pub additions: u64,
    pub removals: u64,
    pub updates: u64,
    pub authority_transfers: u64,
    pub rejected: u64,
}

// =============================================================================
// Membership Registry
// =============================================================================

/// Single-authority registry of node membership records
pub struct MembershipRegistry {
    state: RwLock<RegistryState>,
    clock: Arc<dyn Clock>,
    stats: RegistryStats,
    /// Audit event broadcaster
    event_sender: broadcast::Sender<RegistryEvent>,
}

impl MembershipRegistry {
    /// Create a registry owned by `authority` using wall-clock time
    pub fn new(authority: NodeAddress) -> Self {
        Self::build(authority, crate::config::DEFAULT_EVENT_CAPACITY, Arc::new(SystemClock))
    }

    /// Create a registry with a custom clock
    pub fn with_clock(authority: NodeAddress, clock: Arc<dyn Clock>) -> Self {
        Self::build(authority, crate::config::DEFAULT_EVENT_CAPACITY, clock)
    }

    /// Create a registry from validated configuration
    pub fn with_config(
        authority: NodeAddress,
        config: &RegistryConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(authority, config.event_capacity, clock))
    }

    fn build(authority: NodeAddress, event_capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let (event_sender, _) = broadcast::channel(event_capacity);
        info!(authority = %authority, "Membership registry initialized");

        Self {
            state: RwLock::new(RegistryState::new(authority)),
            clock,
            stats: RegistryStats::default(),
            event_sender,
        }
    }

    /// Get an audit event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_sender.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a new node, active from now on
    pub fn add(&self, caller: &NodeAddress, address: NodeAddress, details: NodeDetails) -> Result<()> {
        let mut state = self.state.write();
        self.guard(state.require_authority(caller))?;
        if state.store.contains(&address) {
            return self.guard(Err(Error::AlreadyExists { address }));
        }

        let now = state.stamp(self.clock.as_ref());
        let distinguished_name = details.distinguished_name.clone();
        state.store.put(address, NodeRecord::new(address, details, now));
        state.index.append(address);

        self.stats.additions.fetch_add(1, Ordering::Relaxed);
        info!(address = %address, dn = %distinguished_name, "Node added");
        self.emit(RegistryEvent::NodeAdded {
            address,
            distinguished_name,
        });
        Ok(())
    }

    /// Remove a node and free its address for reuse
    pub fn remove(&self, caller: &NodeAddress, address: &NodeAddress) -> Result<()> {
        let mut state = self.state.write();
        self.guard(state.require_authority(caller))?;
        self.guard(state.require_present(address))?;

        state.store.delete(address);
        state.index.remove(address);

        self.stats.removals.fetch_add(1, Ordering::Relaxed);
        info!(address = %address, "Node removed");
        self.emit(RegistryEvent::NodeRemoved { address: *address });
        Ok(())
    }

    /// Set a node's active flag
    pub fn update_status(&self, caller: &NodeAddress, address: &NodeAddress, active: bool) -> Result<()> {
        let mut state = self.state.write();
        self.guard(state.require_authority(caller))?;
        self.guard(state.require_present(address))?;

        let now = state.stamp(self.clock.as_ref());
        if let Some(record) = state.store.get_mut(address) {
            record.set_active(active, now);
        }

        self.record_update(address, "status");
        Ok(())
    }

    /// Replace a node's name, key and network fields
    pub fn update_details(
        &self,
        caller: &NodeAddress,
        address: &NodeAddress,
        details: NodeDetails,
    ) -> Result<()> {
        let mut state = self.state.write();
        self.guard(state.require_authority(caller))?;
        self.guard(state.require_present(address))?;

        self.write_details(&mut state, address, details);
        self.record_update(address, "details");
        Ok(())
    }

    /// Replace only a node's network/platform fields
    pub fn update_network_detail(
        &self,
        caller: &NodeAddress,
        address: &NodeAddress,
        network: NetworkDetail,
    ) -> Result<()> {
        let mut state = self.state.write();
        self.guard(state.require_authority(caller))?;

        let Some(current) = state.store.get(address) else {
            return self.guard(Err(Error::NotFound { address: *address }));
        };
        let details = NodeDetails {
            network,
            ..current.details()
        };

        self.write_details(&mut state, address, details);
        self.record_update(address, "network");
        Ok(())
    }

    /// Hand registry authority to another principal
    pub fn transfer_authority(&self, caller: &NodeAddress, new_authority: NodeAddress) -> Result<()> {
        let mut state = self.state.write();
        let previous = self.guard(state.access.transfer(caller, new_authority))?;

        self.stats.authority_transfers.fetch_add(1, Ordering::Relaxed);
        info!(previous = %previous, new = %new_authority, "Registry authority transferred");
        self.emit(RegistryEvent::AuthorityTransferred {
            previous,
            new: new_authority,
        });
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of a node's record
    pub fn get(&self, address: &NodeAddress) -> Result<NodeRecord> {
        self.state
            .read()
            .store
            .get(address)
            .cloned()
            .ok_or(Error::NotFound { address: *address })
    }

    /// Current member addresses
    ///
    /// Join order holds only until the first removal; removals move the
    /// last member into the vacated slot.
    pub fn list(&self) -> Vec<NodeAddress> {
        self.state.read().index.all()
    }

    /// Check if a node is registered
    pub fn exists(&self, address: &NodeAddress) -> bool {
        self.state.read().store.contains(address)
    }

    /// Current authority
    pub fn authority(&self) -> NodeAddress {
        self.state.read().access.authority()
    }

    pub fn len(&self) -> usize {
        self.state.read().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().index.is_empty()
    }

    /// Addresses of active members, in `list()` order
    pub fn active_members(&self) -> Vec<NodeAddress> {
        let state = self.state.read();
        state
            .index
            .as_slice()
            .iter()
            .filter(|address| state.store.get(address).is_some_and(|r| r.active))
            .copied()
            .collect()
    }

    /// Snapshot of every record, in `list()` order
    pub fn records(&self) -> Vec<NodeRecord> {
        let state = self.state.read();
        state
            .index
            .as_slice()
            .iter()
            .filter_map(|address| state.store.get(address).cloned())
            .collect()
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStatsSnapshot {
        let (total_members, active_members) = {
            let state = self.state.read();
            let active = state
                .index
                .as_slice()
                .iter()
                .filter(|address| state.store.get(address).is_some_and(|r| r.active))
                .count();
            (state.index.len() as u64, active as u64)
        };

        RegistryStatsSnapshot {
            total_members,
            active_members,
            additions: self.stats.additions.load(Ordering::Relaxed),
            removals: self.stats.removals.load(Ordering::Relaxed),
            updates: self.stats.updates.load(Ordering::Relaxed),
            authority_transfers: self.stats.authority_transfers.load(Ordering::Relaxed),
            rejected: self.stats.rejected.load(Ordering::Relaxed),
        }
    }

    /// Check that store and index describe the same membership
    pub fn is_consistent(&self) -> bool {
        let state = self.state.read();
        state.index.is_consistent()
            && state.index.len() == state.store.len()
            && state
                .index
                .as_slice()
                .iter()
                .all(|address| state.store.get(address).is_some_and(|r| r.address == *address))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn write_details(&self, state: &mut RegistryState, address: &NodeAddress, details: NodeDetails) {
        let now = state.stamp(self.clock.as_ref());
        if let Some(record) = state.store.get_mut(address) {
            record.apply_details(details, now);
        }
    }

    fn record_update(&self, address: &NodeAddress, what: &'static str) {
        self.stats.updates.fetch_add(1, Ordering::Relaxed);
        info!(address = %address, field = what, "Node updated");
        self.emit(RegistryEvent::NodeUpdated { address: *address });
    }

    /// Count and log a rejected precondition, passing the result through
    fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            match err {
                Error::Unauthorized { caller } => {
                    warn!(caller = %caller, "Rejected registry mutation from non-authority")
                }
                other => debug!(error = %other, "Registry precondition failed"),
            }
        }
        result
    }

    fn emit(&self, event: RegistryEvent) {
        // No subscribers is not an error
        let _ = self.event_sender.send(event);
    }
}

impl std::fmt::Debug for MembershipRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("MembershipRegistry")
            .field("authority", &state.access.authority())
            .field("members", &state.index.len())
            .finish()
    }
}
