//! Unique item registry
//!
//! Each item id has at most one owner. Minting is role-gated; burning is
//! allowed for the owner or the operator the owner approved for that item.

use std::collections::HashMap;

use lib_types::{Address, ItemId};

use crate::access::{AuthoritySet, Role};
use crate::errors::{TokenError, TokenResult};
use crate::journal::{Journal, Journaled};

/// Item registry interface consumed by the shop
pub trait ItemRegistry: Journal {
    /// Address of this registry contract
    fn address(&self) -> Address;

    /// Whether the item currently exists (has an owner)
    fn exists(&self, item: ItemId) -> bool;

    /// Current owner; fails with `ItemNotFound` if the item does not exist
    fn owner_of(&self, item: ItemId) -> TokenResult<Address>;

    /// Operator approved for a single item, if any
    fn approved(&self, item: ItemId) -> Option<Address>;

    /// Number of items held by an account
    fn balance_of(&self, owner: &Address) -> u64;

    fn has_role(&self, role: Role, account: &Address) -> bool;

    /// Approve `operator` for `item`; only the owner may approve
    fn approve(&mut self, owner: &Address, operator: &Address, item: ItemId) -> TokenResult<()>;

    /// Mint `item` to `to`; `minter` must hold `Role::Minter`
    fn mint(&mut self, minter: &Address, to: &Address, item: ItemId) -> TokenResult<()>;

    /// Destroy `item`; `operator` must be the owner or approved
    fn burn(&mut self, operator: &Address, item: ItemId) -> TokenResult<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryState {
    pub owners: HashMap<ItemId, Address>,
    pub approvals: HashMap<ItemId, Address>,
}

/// In-memory item registry
#[derive(Debug, Clone)]
pub struct InMemoryItemRegistry {
    address: Address,
    pub name: String,
    pub symbol: String,
    authorities: AuthoritySet,
    state: Journaled<RegistryState>,
}

impl InMemoryItemRegistry {
    pub fn new(address: Address, name: String, symbol: String, admin: Address) -> Self {
        Self {
            address,
            name,
            symbol,
            authorities: AuthoritySet::with_admin(admin),
            state: Journaled::new(RegistryState::default()),
        }
    }

    pub fn grant_role(&mut self, admin: &Address, role: Role, account: Address) -> TokenResult<()> {
        self.authorities.grant(admin, role, account)?;
        tracing::debug!("{}: granted {:?} to {}", self.symbol, role, account);
        Ok(())
    }

    pub fn revoke_role(&mut self, admin: &Address, role: Role, account: &Address) -> TokenResult<()> {
        self.authorities.revoke(admin, role, account)
    }

    /// Number of live items
    pub fn total_items(&self) -> usize {
        self.state.get().owners.len()
    }
}

impl Journal for InMemoryItemRegistry {
    fn begin(&mut self) {
        self.state.begin();
    }

    fn commit(&mut self) {
        self.state.commit();
    }

    fn rollback(&mut self) {
        self.state.rollback();
    }

    fn depth(&self) -> usize {
        self.state.depth()
    }
}

impl ItemRegistry for InMemoryItemRegistry {
    fn address(&self) -> Address {
        self.address
    }

    fn exists(&self, item: ItemId) -> bool {
        self.state.get().owners.contains_key(&item)
    }

    fn owner_of(&self, item: ItemId) -> TokenResult<Address> {
        self.state
            .get()
            .owners
            .get(&item)
            .copied()
            .ok_or(TokenError::ItemNotFound(item))
    }

    fn approved(&self, item: ItemId) -> Option<Address> {
        self.state.get().approvals.get(&item).copied()
    }

    fn balance_of(&self, owner: &Address) -> u64 {
        self.state
            .get()
            .owners
            .values()
            .filter(|holder| *holder == owner)
            .count() as u64
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.authorities.has_role(role, account)
    }

    fn approve(&mut self, owner: &Address, operator: &Address, item: ItemId) -> TokenResult<()> {
        let current = self.owner_of(item)?;
        if current != *owner {
            return Err(TokenError::NotItemOwner {
                item,
                account: *owner,
            });
        }
        if operator.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.state.get_mut().approvals.insert(item, *operator);
        Ok(())
    }

    fn mint(&mut self, minter: &Address, to: &Address, item: ItemId) -> TokenResult<()> {
        self.authorities.require(Role::Minter, minter)?;
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if self.exists(item) {
            return Err(TokenError::ItemAlreadyExists(item));
        }

        self.state.get_mut().owners.insert(item, *to);
        tracing::debug!("{}: minted item {} to {}", self.symbol, item, to);
        Ok(())
    }

    fn burn(&mut self, operator: &Address, item: ItemId) -> TokenResult<()> {
        let owner = self.owner_of(item)?;
        let approved = self.approved(item);
        if owner != *operator && approved != Some(*operator) {
            return Err(TokenError::NotApproved {
                item,
                operator: *operator,
            });
        }

        let state = self.state.get_mut();
        state.owners.remove(&item);
        state.approvals.remove(&item);
        tracing::debug!("{}: burned item {}", self.symbol, item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> Address {
        Address::new([id; 32])
    }

    fn registry_with_minter(minter: Address) -> InMemoryItemRegistry {
        let admin = addr(100);
        let mut registry =
            InMemoryItemRegistry::new(addr(201), "My NFT".to_string(), "NFT".to_string(), admin);
        registry.grant_role(&admin, Role::Minter, minter).unwrap();
        registry
    }

    #[test]
    fn test_mint_and_owner_of() {
        let mut registry = registry_with_minter(addr(1));
        let item = ItemId(0);

        assert_eq!(registry.owner_of(item), Err(TokenError::ItemNotFound(item)));
        registry.mint(&addr(1), &addr(2), item).unwrap();

        assert_eq!(registry.owner_of(item).unwrap(), addr(2));
        assert_eq!(registry.balance_of(&addr(2)), 1);
        assert_eq!(
            registry.mint(&addr(1), &addr(3), item),
            Err(TokenError::ItemAlreadyExists(item))
        );
    }

    #[test]
    fn test_mint_requires_role() {
        let mut registry = registry_with_minter(addr(1));
        assert!(matches!(
            registry.mint(&addr(9), &addr(2), ItemId(1)),
            Err(TokenError::MissingRole { role: Role::Minter, .. })
        ));
    }

    #[test]
    fn test_burn_requires_owner_or_approval() {
        let mut registry = registry_with_minter(addr(1));
        let item = ItemId(5);
        registry.mint(&addr(1), &addr(2), item).unwrap();

        assert_eq!(
            registry.burn(&addr(3), item),
            Err(TokenError::NotApproved {
                item,
                operator: addr(3)
            })
        );

        registry.approve(&addr(2), &addr(3), item).unwrap();
        registry.burn(&addr(3), item).unwrap();

        assert!(!registry.exists(item));
        assert_eq!(registry.approved(item), None);
        assert_eq!(registry.total_items(), 0);
    }

    #[test]
    fn test_only_owner_can_approve() {
        let mut registry = registry_with_minter(addr(1));
        let item = ItemId(2);
        registry.mint(&addr(1), &addr(2), item).unwrap();

        assert_eq!(
            registry.approve(&addr(3), &addr(3), item),
            Err(TokenError::NotItemOwner {
                item,
                account: addr(3)
            })
        );
    }
}
