//! Fungible token ledger
//!
//! Standard fungible-asset semantics: balances, allowances, role-gated
//! minting, allowance-based burning and transfers.

use std::collections::HashMap;

use lib_types::{Address, Amount};

use crate::access::{AuthoritySet, Role};
use crate::errors::{TokenError, TokenResult};
use crate::journal::{Journal, Journaled};

/// Fungible ledger interface consumed by the shop
pub trait FungibleLedger: Journal {
    /// Address of this ledger contract
    fn address(&self) -> Address;

    fn balance_of(&self, account: &Address) -> Amount;

    fn total_supply(&self) -> Amount;

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    fn has_role(&self, role: Role, account: &Address) -> bool;

    /// Set the allowance `spender` may draw from `owner`
    fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) -> TokenResult<()>;

    /// Mint new units; `minter` must hold `Role::Minter`
    fn mint(&mut self, minter: &Address, to: &Address, amount: Amount) -> TokenResult<()>;

    /// Burn units from `from`, consuming `spender`'s allowance
    fn burn_from(&mut self, spender: &Address, from: &Address, amount: Amount) -> TokenResult<()>;

    /// Transfer units owned by `from`
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()>;

    /// Transfer units from `from`, consuming `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> TokenResult<()>;
}

/// Mutable ledger state (checkpointed as a unit)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FungibleState {
    pub balances: HashMap<Address, Amount>,
    pub allowances: HashMap<(Address, Address), Amount>,
    pub total_supply: Amount,
}

/// In-memory fungible ledger
#[derive(Debug, Clone)]
pub struct InMemoryFungibleLedger {
    address: Address,
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Display decimals
    pub decimals: u8,
    authorities: AuthoritySet,
    state: Journaled<FungibleState>,
}

impl InMemoryFungibleLedger {
    /// Deploy a ledger at `address`, with `admin` holding `Role::Admin`
    pub fn new(address: Address, name: String, symbol: String, decimals: u8, admin: Address) -> Self {
        Self {
            address,
            name,
            symbol,
            decimals,
            authorities: AuthoritySet::with_admin(admin),
            state: Journaled::new(FungibleState::default()),
        }
    }

    /// Grant a role (e.g. the minter capability to the shop)
    pub fn grant_role(&mut self, admin: &Address, role: Role, account: Address) -> TokenResult<()> {
        self.authorities.grant(admin, role, account)?;
        tracing::debug!("{}: granted {:?} to {}", self.symbol, role, account);
        Ok(())
    }

    pub fn revoke_role(&mut self, admin: &Address, role: Role, account: &Address) -> TokenResult<()> {
        self.authorities.revoke(admin, role, account)
    }

    pub fn state(&self) -> &FungibleState {
        self.state.get()
    }

    fn debit(&mut self, account: &Address, amount: Amount) -> TokenResult<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }
        let balances = &mut self.state.get_mut().balances;
        match balance - amount {
            0 => balances.remove(account),
            rest => balances.insert(*account, rest),
        };
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: Amount) -> TokenResult<()> {
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.state.get_mut().balances.insert(*account, balance);
        Ok(())
    }

    fn spend_allowance(&mut self, owner: &Address, spender: &Address, amount: Amount) -> TokenResult<()> {
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                have: allowance,
                need: amount,
            });
        }
        let allowances = &mut self.state.get_mut().allowances;
        match allowance - amount {
            0 => allowances.remove(&(*owner, *spender)),
            rest => allowances.insert((*owner, *spender), rest),
        };
        Ok(())
    }
}

impl Journal for InMemoryFungibleLedger {
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

impl FungibleLedger for InMemoryFungibleLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.state.get().balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.state.get().total_supply
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state
            .get()
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.authorities.has_role(role, account)
    }

    fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) -> TokenResult<()> {
        if spender.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let allowances = &mut self.state.get_mut().allowances;
        if amount == 0 {
            allowances.remove(&(*owner, *spender));
        } else {
            allowances.insert((*owner, *spender), amount);
        }
        Ok(())
    }

    fn mint(&mut self, minter: &Address, to: &Address, amount: Amount) -> TokenResult<()> {
        self.authorities.require(Role::Minter, minter)?;
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }

        let total_supply = self
            .total_supply()
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.credit(to, amount)?;
        self.state.get_mut().total_supply = total_supply;

        tracing::debug!("{}: minted {} to {}", self.symbol, amount, to);
        Ok(())
    }

    fn burn_from(&mut self, spender: &Address, from: &Address, amount: Amount) -> TokenResult<()> {
        if spender != from {
            self.spend_allowance(from, spender, amount)?;
        }
        self.debit(from, amount)?;

        let state = self.state.get_mut();
        state.total_supply = state
            .total_supply
            .checked_sub(amount)
            .ok_or(TokenError::Overflow)?;

        tracing::debug!("{}: burned {} from {}", self.symbol, amount, from);
        Ok(())
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> TokenResult<()> {
        self.spend_allowance(from, spender, amount)?;
        self.transfer(from, to, amount)
    }
}
