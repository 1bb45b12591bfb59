//! Capability-based access control
//!
//! Privileged ledger calls (minting, granting roles) are gated by explicit
//! (principal, permission) pairs rather than by any particular role registry.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use lib_types::Address;

use crate::errors::{TokenError, TokenResult};

/// Permission a principal can hold on one ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May grant and revoke roles
    Admin,
    /// May mint new units (fungible) or new items (registry)
    Minter,
}

/// Explicit (principal, role) pairs for one ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthoritySet {
    authorities: HashMap<Role, HashSet<Address>>,
}

impl AuthoritySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an authority set with a single admin
    pub fn with_admin(admin: Address) -> Self {
        let mut set = Self::new();
        set.add(Role::Admin, admin);
        set
    }

    pub fn add(&mut self, role: Role, address: Address) {
        self.authorities.entry(role).or_default().insert(address);
    }

    pub fn remove(&mut self, role: Role, address: &Address) {
        if let Some(set) = self.authorities.get_mut(&role) {
            set.remove(address);
        }
    }

    pub fn has_role(&self, role: Role, address: &Address) -> bool {
        self.authorities
            .get(&role)
            .map(|set| set.contains(address))
            .unwrap_or(false)
    }

    /// Fail with `MissingRole` unless `address` holds `role`
    pub fn require(&self, role: Role, address: &Address) -> TokenResult<()> {
        if self.has_role(role, address) {
            Ok(())
        } else {
            Err(TokenError::MissingRole {
                role,
                account: *address,
            })
        }
    }

    /// Grant a role, authorized by an admin
    pub fn grant(&mut self, admin: &Address, role: Role, address: Address) -> TokenResult<()> {
        self.require(Role::Admin, admin)?;
        if address.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.add(role, address);
        Ok(())
    }

    /// Revoke a role, authorized by an admin
    pub fn revoke(&mut self, admin: &Address, role: Role, address: &Address) -> TokenResult<()> {
        self.require(Role::Admin, admin)?;
        self.remove(role, address);
        Ok(())
    }

    /// Principals currently holding `role`
    pub fn addresses(&self, role: Role) -> impl Iterator<Item = &Address> {
        self.authorities
            .get(&role)
            .map(|set| set.iter())
            .into_iter()
            .flatten()
    }
}
