//! Rate Engine
//!
//! Pure conversion arithmetic between native currency, fungible tokens and
//! items. No side effects.
//!
//! # Rounding
//! - Native → fungible rounds down; the remainder stays with the shop as
//!   native currency.
//! - Fungible → native is exact.
//! - An item refund is half the price rounded down, so the pool keeps the
//!   odd unit.

use serde::{Deserialize, Serialize};

use lib_types::Amount;

use crate::errors::{ShopError, ShopResult};

/// Fixed conversion parameters of a deployed shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEngine {
    /// Native units per one fungible unit
    ratio: Amount,
    /// Fungible units per item
    item_price: Amount,
}

impl RateEngine {
    pub fn new(ratio: Amount, item_price: Amount) -> ShopResult<Self> {
        if ratio == 0 {
            return Err(ShopError::InvalidConfig("ratio must be positive".to_string()));
        }
        if item_price == 0 {
            return Err(ShopError::InvalidConfig("item price must be positive".to_string()));
        }
        Ok(Self { ratio, item_price })
    }

    pub fn ratio(&self) -> Amount {
        self.ratio
    }

    pub fn item_price(&self) -> Amount {
        self.item_price
    }

    /// floor(native / ratio)
    ///
    /// Rejects zero input and deposits too small to buy a single unit.
    pub fn native_to_fungible(&self, native_amount: Amount) -> ShopResult<Amount> {
        if native_amount == 0 {
            return Err(ShopError::InvalidAmount("native amount is zero".to_string()));
        }

        let fungible = native_amount
            .checked_div(self.ratio)
            .ok_or(ShopError::ArithmeticOverflow)?;

        if fungible == 0 {
            return Err(ShopError::InvalidAmount(format!(
                "native amount {} is below the ratio {}",
                native_amount, self.ratio
            )));
        }

        Ok(fungible)
    }

    /// fungible * ratio, exact
    pub fn fungible_to_native(&self, fungible_amount: Amount) -> ShopResult<Amount> {
        if fungible_amount == 0 {
            return Err(ShopError::InvalidAmount("token amount is zero".to_string()));
        }

        fungible_amount
            .checked_mul(self.ratio)
            .ok_or(ShopError::ArithmeticOverflow)
    }

    /// Native units kept by the shop when `native_amount` is converted
    pub fn remainder(&self, native_amount: Amount) -> Amount {
        native_amount % self.ratio
    }

    /// Fungible units paid back when an item is returned
    pub fn refund_for_item(&self) -> Amount {
        self.item_price / 2
    }

    /// Fungible units the pool keeps per bought-and-returned item
    pub fn item_margin(&self) -> Amount {
        self.item_price - self.refund_for_item()
    }
}
