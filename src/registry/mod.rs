//! Membership Registry Module
//!
//! Single-authority node membership registry: a direct-lookup record store,
//! an enumerable membership index kept in step with it, the access
//! controller gating every mutation, and the audit events emitted on
//! success.

pub mod access;
pub mod events;
pub mod index;
pub mod membership_registry;
pub mod store;

pub use access::*;
pub use events::*;
pub use index::*;
pub use membership_registry::*;
pub use store::*;
