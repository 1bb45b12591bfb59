//! Exchange Ledger
//!
//! Mediates native currency, fungible tokens and unique items:
//!
//! ```text
//!             buy_tokens                buy_item
//!   native  ─────────────▶  fungible  ─────────────▶  item
//!           ◀─────────────            ◀─────────────
//!            return_tokens             return_item
//! ```
//!
//! # Invariants
//! - `ratio > 0` and `item_price > 0`, immutable after deployment
//! - The pool is the shop's own fungible balance; it is never tracked separately
//! - Every call is atomic: all collaborator effects commit together or none do
//! - No call may start while another is in flight (reentrancy guard)

use std::cell::Cell;

use lib_tokens::Role;
use lib_types::{Address, Amount, ItemId};

use crate::config::ShopConfig;
use crate::errors::{ShopError, ShopResult};
use crate::events::ShopEvent;
use crate::guard::ReentrancyGuard;
use crate::ledgers::Ledgers;
use crate::rate::RateEngine;

/// One deployed shop
#[derive(Debug)]
pub struct Shop {
    config: ShopConfig,
    rates: RateEngine,
    custodian: Cell<Address>,
    guard: ReentrancyGuard,
}

impl Shop {
    /// Deploy a shop from a validated configuration
    pub fn new(config: ShopConfig) -> ShopResult<Self> {
        config
            .validate()
            .map_err(|e| ShopError::InvalidConfig(e.to_string()))?;
        let rates = RateEngine::new(config.ratio, config.item_price)?;

        tracing::info!(
            "Shop deployed at {}: ratio={} item_price={} custodian={}",
            config.shop_address,
            config.ratio,
            config.item_price,
            config.custodian
        );

        Ok(Self {
            custodian: Cell::new(config.custodian),
            config,
            rates,
            guard: ReentrancyGuard::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn ratio(&self) -> Amount {
        self.rates.ratio()
    }

    pub fn item_price(&self) -> Amount {
        self.rates.item_price()
    }

    /// Address of the fungible ledger used for payment
    pub fn payment_token(&self) -> Address {
        self.config.payment_token
    }

    /// Address of the item registry
    pub fn nft_contract(&self) -> Address {
        self.config.item_registry
    }

    pub fn custodian(&self) -> Address {
        self.custodian.get()
    }

    /// The shop's own account
    pub fn address(&self) -> Address {
        self.config.shop_address
    }

    // =========================================================================
    // Conversion operations
    // =========================================================================

    /// Exchange `value` native units for floor(value / ratio) fungible units
    ///
    /// The remainder stays in the shop's native reserve.
    ///
    /// # Errors
    /// - `InvalidAmount` if `value` is zero or below the ratio
    /// - collaborator errors (insufficient native funds, missing minter role)
    pub fn buy_tokens(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        value: Amount,
    ) -> ShopResult<ShopEvent> {
        self.execute("buy_tokens", caller, ledgers, |ledgers| {
            if value == 0 {
                return Err(ShopError::InvalidAmount("no native currency sent".to_string()));
            }
            let token_amount = self.rates.native_to_fungible(value)?;
            let retained = self.rates.remainder(value);
            tracing::debug!(
                "buy_tokens: value={} tokens={} retained={}",
                value,
                token_amount,
                retained
            );

            let shop = self.address();
            ledgers.native.transfer(caller, &shop, value)?;
            ledgers.payment.mint(&shop, caller, token_amount)?;

            Ok(ShopEvent::TokensPurchased {
                buyer: *caller,
                native_amount: value,
                token_amount,
                retained,
            })
        })
    }

    /// Burn `amount` fungible units (via the shop's allowance) and pay back
    /// `amount * ratio` native units
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is zero
    /// - `ArithmeticOverflow` if `amount * ratio` does not fit
    /// - `InsufficientReserve` if the shop cannot cover the payout
    /// - collaborator errors (insufficient allowance or balance)
    pub fn return_tokens(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        amount: Amount,
    ) -> ShopResult<ShopEvent> {
        self.execute("return_tokens", caller, ledgers, |ledgers| {
            if amount == 0 {
                return Err(ShopError::InvalidAmount("no tokens returned".to_string()));
            }
            let native_amount = self.rates.fungible_to_native(amount)?;

            let shop = self.address();
            ledgers.payment.burn_from(&shop, caller, amount)?;

            let reserve = ledgers.native.balance_of(&shop);
            if reserve < native_amount {
                return Err(ShopError::InsufficientReserve {
                    have: reserve,
                    need: native_amount,
                });
            }
            ledgers.native.transfer(&shop, caller, native_amount)?;

            Ok(ShopEvent::TokensReturned {
                seller: *caller,
                token_amount: amount,
                native_amount,
            })
        })
    }

    /// Buy `item_id` for `item_price` fungible units (via the shop's allowance)
    ///
    /// The payment stays in the shop's account and is pool balance at once.
    ///
    /// # Errors
    /// - `ItemUnavailable` if the item already exists
    /// - collaborator errors (insufficient allowance or balance, missing minter role)
    pub fn buy_item(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        item_id: ItemId,
    ) -> ShopResult<ShopEvent> {
        self.execute("buy_item", caller, ledgers, |ledgers| {
            if ledgers.items.exists(item_id) {
                return Err(ShopError::ItemUnavailable(item_id));
            }

            let shop = self.address();
            let price = self.rates.item_price();
            ledgers.payment.transfer_from(&shop, caller, &shop, price)?;
            ledgers.items.mint(&shop, caller, item_id)?;

            Ok(ShopEvent::ItemPurchased {
                buyer: *caller,
                item_id,
                price,
            })
        })
    }

    /// Return `item_id` for a refund of half the item price, rounded down
    ///
    /// The caller must own the item and have approved the shop for it. The
    /// refund is paid from the pool.
    ///
    /// # Errors
    /// - `NotOwner` if the caller does not own the item
    /// - collaborator errors (unknown item, shop not approved, pool too small)
    pub fn return_item(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        item_id: ItemId,
    ) -> ShopResult<ShopEvent> {
        self.execute("return_item", caller, ledgers, |ledgers| {
            let owner = ledgers.items.owner_of(item_id)?;
            if owner != *caller {
                return Err(ShopError::NotOwner {
                    item_id,
                    caller: *caller,
                });
            }

            let shop = self.address();
            let refund = self.rates.refund_for_item();
            ledgers.items.burn(&shop, item_id)?;
            ledgers.payment.transfer(&shop, caller, refund)?;

            Ok(ShopEvent::ItemReturned {
                owner: *caller,
                item_id,
                refund,
            })
        })
    }

    // =========================================================================
    // Custodian operations
    // =========================================================================

    /// Move the entire pool to the custodian
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the custodian
    /// - `InvalidAmount` if the pool is empty
    pub fn withdraw(&self, ledgers: &mut Ledgers<'_>, caller: &Address) -> ShopResult<ShopEvent> {
        self.execute("withdraw", caller, ledgers, |ledgers| {
            let custodian = self.require_custodian(caller)?;

            let shop = self.address();
            let amount = ledgers.payment.balance_of(&shop);
            if amount == 0 {
                return Err(ShopError::InvalidAmount("pool is empty".to_string()));
            }
            ledgers.payment.transfer(&shop, &custodian, amount)?;

            Ok(ShopEvent::Withdrawal { custodian, amount })
        })
    }

    /// Move `amount` pool tokens to the custodian
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the custodian
    /// - `InvalidAmount` if `amount` is zero
    /// - collaborator error if `amount` exceeds the pool
    pub fn withdraw_amount(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        amount: Amount,
    ) -> ShopResult<ShopEvent> {
        self.execute("withdraw_amount", caller, ledgers, |ledgers| {
            let custodian = self.require_custodian(caller)?;
            if amount == 0 {
                return Err(ShopError::InvalidAmount("withdrawal amount is zero".to_string()));
            }

            ledgers.payment.transfer(&self.address(), &custodian, amount)?;

            Ok(ShopEvent::Withdrawal { custodian, amount })
        })
    }

    /// Hand the custodian role to `new_custodian`
    pub fn transfer_custody(
        &self,
        ledgers: &mut Ledgers<'_>,
        caller: &Address,
        new_custodian: Address,
    ) -> ShopResult<ShopEvent> {
        self.execute("transfer_custody", caller, ledgers, |_| {
            let previous = self.require_custodian(caller)?;
            if new_custodian.is_zero() {
                return Err(ShopError::InvalidConfig(
                    "custodian cannot be the zero address".to_string(),
                ));
            }
            if new_custodian == self.address() {
                return Err(ShopError::InvalidConfig(
                    "custodian cannot be the shop's own account".to_string(),
                ));
            }

            self.custodian.set(new_custodian);

            Ok(ShopEvent::CustodyTransferred {
                previous,
                current: new_custodian,
            })
        })
    }

    // =========================================================================
    // Wiring checks
    // =========================================================================

    /// Verify the shop holds the minter capability on both collaborators
    pub fn check_capabilities(&self, ledgers: &Ledgers<'_>) -> ShopResult<()> {
        self.check_collaborators(ledgers)?;

        let shop = self.address();
        if !ledgers.payment.has_role(Role::Minter, &shop) {
            return Err(ShopError::MissingCapability {
                collaborator: "payment token",
                role: Role::Minter,
            });
        }
        if !ledgers.items.has_role(Role::Minter, &shop) {
            return Err(ShopError::MissingCapability {
                collaborator: "item registry",
                role: Role::Minter,
            });
        }
        Ok(())
    }

    fn check_collaborators(&self, ledgers: &Ledgers<'_>) -> ShopResult<()> {
        check_address("payment token", self.config.payment_token, ledgers.payment.address())?;
        check_address("item registry", self.config.item_registry, ledgers.items.address())
    }

    fn require_custodian(&self, caller: &Address) -> ShopResult<Address> {
        let custodian = self.custodian.get();
        if *caller != custodian {
            return Err(ShopError::Unauthorized(*caller));
        }
        Ok(custodian)
    }

    /// Run `body` as one atomic, non-reentrant call
    ///
    /// Collaborator effects are committed only if `body` succeeds; the
    /// resulting event is indexed after the commit.
    fn execute<'a, F>(
        &self,
        operation: &'static str,
        caller: &Address,
        ledgers: &mut Ledgers<'a>,
        body: F,
    ) -> ShopResult<ShopEvent>
    where
        F: FnOnce(&mut Ledgers<'a>) -> ShopResult<ShopEvent>,
    {
        let _entered = self.guard.enter().map_err(|err| {
            tracing::warn!("Shop: {} by {} rejected: {}", operation, caller, err);
            err
        })?;
        self.check_collaborators(ledgers)?;

        ledgers.begin();
        match body(ledgers) {
            Ok(event) => {
                ledgers.commit();
                tracing::info!("Shop: {} committed: {}", operation, event);
                ledgers.events.index_event(event.clone());
                Ok(event)
            }
            Err(err) => {
                ledgers.rollback();
                tracing::warn!("Shop: {} by {} reverted: {}", operation, caller, err);
                Err(err)
            }
        }
    }
}

fn check_address(collaborator: &'static str, expected: Address, actual: Address) -> ShopResult<()> {
    if expected != actual {
        return Err(ShopError::CollaboratorMismatch {
            collaborator,
            expected,
            actual,
        });
    }
    Ok(())
}
