//! Shop exchange ledger
//!
//! A shop converts between three asset kinds held in external ledgers:
//!
//! - native currency, exchanged for fungible tokens at a fixed `ratio`
//! - fungible tokens, minted on purchase and burned on return
//! - unique items, minted for `item_price` tokens and burned for half back
//!
//! Item payments accumulate in the shop's own token balance (the pool), which
//! only the custodian can withdraw.
//!
//! # Key Types
//!
//! - [`Shop`]: the exchange state machine
//! - [`Ledgers`]: collaborators borrowed for one call
//! - [`RateEngine`]: pure conversion arithmetic
//! - [`ShopConfig`]: deployment parameters, loadable from TOML
//! - [`ShopEvent`]: audit record emitted by every committed call
//!
//! # Example
//!
//! ```
//! use lib_shop::{InMemoryEventIndexer, Ledgers, Shop, ShopConfig};
//! use lib_tokens::{
//!     FungibleLedger, InMemoryFungibleLedger, InMemoryItemRegistry, InMemoryNativeBank, ItemRegistry,
//!     Role,
//! };
//! use lib_types::Address;
//!
//! let shop_addr = Address::new([1u8; 32]);
//! let admin = Address::new([9u8; 32]);
//! let buyer = Address::new([7u8; 32]);
//!
//! let mut token = InMemoryFungibleLedger::new(
//!     Address::new([2u8; 32]), "My Token".into(), "MTK".into(), 18, admin,
//! );
//! token.grant_role(&admin, Role::Minter, shop_addr).unwrap();
//! let mut nft = InMemoryItemRegistry::new(Address::new([3u8; 32]), "My NFT".into(), "NFT".into(), admin);
//! let mut bank = InMemoryNativeBank::new();
//! bank.credit(&buyer, 50).unwrap();
//! let mut indexer = InMemoryEventIndexer::new();
//!
//! let shop = Shop::new(ShopConfig::new(
//!     5, 4, shop_addr, token.address(), nft.address(), Address::new([4u8; 32]),
//! )).unwrap();
//!
//! let mut ledgers = Ledgers::new(&mut bank, &mut token, &mut nft, &mut indexer);
//! shop.buy_tokens(&mut ledgers, &buyer, 50).unwrap();
//! assert_eq!(ledgers.payment.balance_of(&buyer), 10);
//! ```

pub mod config;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ledgers;
pub mod pool;
pub mod rate;
pub mod shop;

pub use config::{ConfigError, ConfigResult, ShopConfig};
pub use errors::{ShopError, ShopResult};
pub use events::{EventIndexer, InMemoryEventIndexer, ShopEvent};
pub use guard::{GuardHandle, ReentrancyGuard};
pub use ledgers::Ledgers;
pub use pool::ShopStats;
pub use rate::RateEngine;
pub use shop::Shop;
