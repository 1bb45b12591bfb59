//! Pool and reserve queries
//!
//! The pool is the shop's balance on the payment token: item payments flow
//! in, refunds and withdrawals flow out. The reserve is the shop's native
//! balance backing token returns.

use serde::{Deserialize, Serialize};

use lib_tokens::{FungibleLedger, NativeBank};
use lib_types::{Address, Amount};

use crate::ledgers::Ledgers;
use crate::shop::Shop;

/// Point-in-time view of a shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopStats {
    pub ratio: Amount,
    pub item_price: Amount,
    pub pool_balance: Amount,
    pub reserve_balance: Amount,
    pub token_supply: Amount,
    pub custodian: Address,
}

impl Shop {
    /// Fungible units held by the shop
    pub fn pool_balance(&self, payment: &dyn FungibleLedger) -> Amount {
        payment.balance_of(&self.address())
    }

    /// Native units held by the shop
    pub fn reserve_balance(&self, native: &dyn NativeBank) -> Amount {
        native.balance_of(&self.address())
    }

    pub fn stats(&self, ledgers: &Ledgers<'_>) -> ShopStats {
        ShopStats {
            ratio: self.ratio(),
            item_price: self.item_price(),
            pool_balance: self.pool_balance(&*ledgers.payment),
            reserve_balance: self.reserve_balance(&*ledgers.native),
            token_supply: ledgers.payment.total_supply(),
            custodian: self.custodian(),
        }
    }
}
