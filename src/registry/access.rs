//! Access Controller
//!
//! Holds the single principal allowed to mutate the registry and implements
//! the explicit handover of that role.

use crate::domain::{AccessPolicy, NodeAddress};
use crate::error::{Error, Result};

/// Single-authority access controller
#[derive(Debug, Clone)]
pub struct AccessController {
    authority: NodeAddress,
}

impl AccessController {
    /// Create a controller owned by the initializing principal
    pub fn new(authority: NodeAddress) -> Self {
        Self { authority }
    }

    /// Current authority
    #[inline]
    pub fn authority(&self) -> NodeAddress {
        self.authority
    }

    /// Hand authority to `new_authority`
    ///
    /// Returns the previous authority on success.
    pub fn transfer(&mut self, caller: &NodeAddress, new_authority: NodeAddress) -> Result<NodeAddress> {
        if !self.authorize(caller) {
            return Err(Error::Unauthorized { caller: *caller });
        }
        if new_authority.is_zero() {
            return Err(Error::InvalidTarget);
        }
        Ok(std::mem::replace(&mut self.authority, new_authority))
    }
}

impl AccessPolicy for AccessController {
    #[inline]
    fn authorize(&self, caller: &NodeAddress) -> bool {
        *caller == self.authority
    }
}
