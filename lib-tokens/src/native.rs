//! Native currency balances
//!
//! The native currency is owned by the execution environment. The shop only
//! moves it (deposits in, refunds out) and reads balances.

use std::collections::HashMap;

use lib_types::{Address, Amount};

use crate::errors::{TokenError, TokenResult};
use crate::journal::{Journal, Journaled};

/// Native currency interface consumed by the shop
pub trait NativeBank: Journal {
    /// Native balance of an account
    fn balance_of(&self, account: &Address) -> Amount;

    /// Move native currency between accounts
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()>;
}

/// In-memory native bank used by tests and simulations
#[derive(Debug, Clone, Default)]
pub struct InMemoryNativeBank {
    balances: Journaled<HashMap<Address, Amount>>,
}

impl InMemoryNativeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue native currency to an account (genesis funding)
    pub fn credit(&mut self, account: &Address, amount: Amount) -> TokenResult<()> {
        let balance = self.balances.get_mut().entry(*account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Total native currency across all accounts
    pub fn total_issued(&self) -> Amount {
        self.balances.get().values().sum()
    }
}

impl Journal for InMemoryNativeBank {
    fn begin(&mut self) {
        self.balances.begin();
    }

    fn commit(&mut self) {
        self.balances.commit();
    }

    fn rollback(&mut self) {
        self.balances.rollback();
    }

    fn depth(&self) -> usize {
        self.balances.depth()
    }
}

impl NativeBank for InMemoryNativeBank {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get().get(account).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> TokenResult<()> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        let balances = self.balances.get_mut();
        match from_balance - amount {
            0 => balances.remove(from),
            rest => balances.insert(*from, rest),
        };
        balances.insert(*to, to_balance);
        Ok(())
    }
}
